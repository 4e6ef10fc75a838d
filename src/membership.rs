//! Membership lookup and the not-yet-joined filter.
//!
//! The "fresh" leaderboard variant drops channels the invoking user is
//! already a member of. Memberships come from a cursor-paginated listing
//! that must be drained completely before filtering: a partial set would
//! incorrectly keep channels the user is actually in. Cursor pages are
//! few and cheap, so no courtesy delay applies here.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::slack::SlackApi;

/// Collects the full set of channel ids the user is a member of.
///
/// Follows `next_cursor` until the listing reports no further page.
pub async fn member_channel_ids(api: &dyn SlackApi, user: &str) -> Result<HashSet<String>> {
    let mut members = HashSet::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = api.user_conversations(user, cursor.as_deref()).await?;
        members.extend(page.channel_ids);

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(user = %user, memberships = members.len(), "drained membership listing");
    Ok(members)
}

/// Drops ranked channels the user is already a member of.
///
/// Order is preserved; the result is always a subset of the input with no
/// overlap with `memberships`.
pub fn retain_unjoined(
    ranked: Vec<(String, u32)>,
    memberships: &HashSet<String>,
) -> Vec<(String, u32)> {
    ranked
        .into_iter()
        .filter(|(channel, _)| !memberships.contains(channel))
        .collect()
}
