//! The ranking pipeline: paginated history sweep, per-channel
//! aggregation, deterministic ordering, and topic enrichment.
//!
//! Control flow for one leaderboard run:
//!
//! 1. [`search_query`] builds the history query, pushing blocklist
//!    exclusion into the search itself so blocked channels never consume
//!    fetch or enrichment work.
//! 2. [`fetch_matches`] sweeps recent history page by page under the
//!    courtesy delay.
//! 3. [`ChannelCounts`] tallies eligible matches and [`ChannelCounts::ranking`]
//!    orders them.
//! 4. [`fetch_topics`] decorates the top entries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pulse::blocklist::Blocklist;
//! use pulse::pace::FixedPacer;
//! use pulse::ranking::{self, ChannelCounts, SilentProgress};
//! use pulse::slack::SlackClient;
//!
//! # async fn example() -> pulse::Result<()> {
//! let api = SlackClient::new("xoxb-bot", "xoxp-user");
//! let pacer = FixedPacer::default();
//!
//! let query = ranking::search_query(&Blocklist::new());
//! let matches = ranking::fetch_matches(&api, &pacer, &SilentProgress, &query, 250).await?;
//!
//! let counts = ChannelCounts::from_matches(&matches);
//! let ranked = counts.ranking();
//! let topics = ranking::fetch_topics(&api, &ranked, 5).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::blocklist::Blocklist;
use crate::error::{Error, Result};
use crate::pace::Pacer;
use crate::slack::SlackApi;
use crate::types::{MessageMatch, MAX_COUNT};

/// Fixed page size for history sweeps (the API's per-page cap).
pub const PAGE_SIZE: u32 = 100;

/// Advisory progress messages emitted while a command runs.
///
/// The only current emitter is the fetcher, which warns the invoking user
/// once before a multi-page sweep begins. Hosts typically post the text
/// as an ephemeral reply; tests capture it.
#[async_trait]
pub trait ProgressNotifier: Send + Sync {
    /// Deliver one advisory message to the invoking user.
    async fn notify(&self, text: &str);
}

/// Notifier that drops all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

#[async_trait]
impl ProgressNotifier for SilentProgress {
    async fn notify(&self, _text: &str) {}
}

/// Builds the history query for a ranking run.
///
/// Direct messages are excluded outright, and every blocked channel is
/// excluded at the query level with an `-in:` term, so blocked channels
/// never appear in the fetched matches at all.
///
/// # Examples
///
/// ```rust
/// use pulse::blocklist::Blocklist;
/// use pulse::ranking::search_query;
///
/// let blocklist: Blocklist = ["C111".to_string(), "C222".to_string()]
///     .into_iter()
///     .collect();
/// assert_eq!(search_query(&blocklist), "-is:dm -in:<#C111> -in:<#C222>");
/// ```
pub fn search_query(blocklist: &Blocklist) -> String {
    let mut query = String::from("-is:dm");
    for channel in blocklist.iter() {
        query.push_str(" -in:<#");
        query.push_str(channel);
        query.push('>');
    }
    query
}

/// Advisory text for a sweep that needs more than one page.
///
/// The elapsed-time estimate brackets the courtesy delays the sweep will
/// incur: 1.25 s per full hundred requested up to 1.75 s per started
/// hundred.
fn pagination_advisory(count: u32) -> String {
    let low = 1.25 * f64::from(count / PAGE_SIZE);
    let high = 1.75 * f64::from(count.div_ceil(PAGE_SIZE));
    format!(
        "Sweeping {} messages across multiple pages; expect roughly {}-{} seconds.",
        count, low, high
    )
}

/// Sweeps recent message history until `count` matches are accumulated or
/// the result set is exhausted.
///
/// The first page is requested at size `min(count, 100)`; subsequent
/// pages use the fixed page size, and delivered results are truncated so
/// the sweep never returns more than `count`. Before every page request
/// after the first, the pacer suspends the invocation once - the upstream
/// API enforces its own rate limit, and violating it fails the whole
/// sweep, so the delay is never skipped or shortened. If pagination is
/// going to happen at all, one advisory goes to the notifier first.
///
/// # Errors
///
/// * [`Error::CountTooLarge`] - `count` above [`MAX_COUNT`]; rejected
///   before any request is issued
/// * Any transport, API, or rate-limit error from the underlying client,
///   which aborts the sweep with no retry
pub async fn fetch_matches(
    api: &dyn SlackApi,
    pacer: &dyn Pacer,
    progress: &dyn ProgressNotifier,
    query: &str,
    count: u32,
) -> Result<Vec<MessageMatch>> {
    if count > MAX_COUNT {
        return Err(Error::count_too_large(count, MAX_COUNT));
    }

    let first_size = count.min(PAGE_SIZE);
    let first = api.search_messages(query, first_size, 1).await?;
    let more_pages = first.has_more();

    let mut matches = first.matches;
    matches.truncate(count as usize);

    if matches.len() as u32 >= count || !more_pages {
        return Ok(matches);
    }

    progress.notify(&pagination_advisory(count)).await;

    let mut page_number = 2;
    loop {
        // The delay runs before every request after the first, exactly
        // pagesRequested - 1 times per sweep.
        pacer.pause().await;

        let page = api.search_messages(query, PAGE_SIZE, page_number).await?;
        debug!(page = page_number, fetched = matches.len(), "swept history page");

        let needed = (count as usize) - matches.len();
        let exhausted = !page.has_more();
        let mut batch = page.matches;
        if batch.is_empty() {
            // An empty page means the result set is spent regardless of
            // what the pagination block claims.
            break;
        }
        batch.truncate(needed);
        matches.extend(batch);

        if matches.len() as u32 >= count || exhausted {
            break;
        }
        page_number += 1;
    }

    Ok(matches)
}

#[derive(Debug, Clone)]
struct ChannelStat {
    count: u32,
    first_seen: usize,
}

/// Per-channel occurrence counts for one ranking run.
///
/// Only matches in public, non-private channels are tallied. Each
/// channel's first-seen position is recorded alongside its count so the
/// ranking has a deterministic tie-break.
#[derive(Debug, Clone, Default)]
pub struct ChannelCounts {
    stats: HashMap<String, ChannelStat>,
}

impl ChannelCounts {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies a whole slice of matches.
    pub fn from_matches(matches: &[MessageMatch]) -> Self {
        let mut counts = Self::new();
        for m in matches {
            counts.record(m);
        }
        counts
    }

    /// Tallies one match, skipping anything that is not a public channel.
    pub fn record(&mut self, m: &MessageMatch) {
        let Some(channel) = &m.channel else { return };
        if !channel.is_channel || channel.is_private {
            return;
        }

        let next_index = self.stats.len();
        self.stats
            .entry(channel.id.clone())
            .and_modify(|s| s.count += 1)
            .or_insert(ChannelStat {
                count: 1,
                first_seen: next_index,
            });
    }

    /// Count for one channel; zero when unseen.
    pub fn count(&self, channel: &str) -> u32 {
        self.stats.get(channel).map(|s| s.count).unwrap_or(0)
    }

    /// Number of distinct channels tallied.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True when no eligible match was tallied.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Orders the tallied channels by descending count.
    ///
    /// Ties break by first-seen order, so the ranking is a pure,
    /// idempotent function of the tally: the same counts always produce
    /// the same sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulse::ranking::ChannelCounts;
    /// use pulse::types::{MatchChannel, MessageMatch};
    ///
    /// fn in_channel(id: &str) -> MessageMatch {
    ///     MessageMatch {
    ///         channel: Some(MatchChannel {
    ///             id: id.to_string(),
    ///             is_channel: true,
    ///             is_private: false,
    ///         }),
    ///         ts: None,
    ///         user: None,
    ///     }
    /// }
    ///
    /// let counts = ChannelCounts::from_matches(&[
    ///     in_channel("C1"),
    ///     in_channel("C2"),
    ///     in_channel("C2"),
    /// ]);
    /// let ranked = counts.ranking();
    /// assert_eq!(ranked[0], ("C2".to_string(), 2));
    /// assert_eq!(ranked[1], ("C1".to_string(), 1));
    /// ```
    pub fn ranking(&self) -> Vec<(String, u32)> {
        let mut entries: Vec<(&String, &ChannelStat)> = self.stats.iter().collect();
        entries.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then_with(|| a.1.first_seen.cmp(&b.1.first_seen))
        });
        entries
            .into_iter()
            .map(|(id, stat)| (id.clone(), stat.count))
            .collect()
    }
}

/// Fetches topic text for the top `top_n` ranked channels.
///
/// Calls run sequentially and the returned vector is order-aligned with
/// the ranking: `topics[i]` belongs to `ranked[i]`. A channel without a
/// topic yields an empty string rather than being omitted; whether to
/// render it is the host's choice.
pub async fn fetch_topics(
    api: &dyn SlackApi,
    ranked: &[(String, u32)],
    top_n: usize,
) -> Result<Vec<String>> {
    let mut topics = Vec::with_capacity(top_n.min(ranked.len()));

    for (channel, _) in ranked.iter().take(top_n) {
        let info = api.channel_info(channel).await?;
        topics.push(info.topic);
    }

    Ok(topics)
}
