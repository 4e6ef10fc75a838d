//! Slash-command handlers: the leaderboard run and the blocklist toggle.
//!
//! The host service owns command registration, acknowledgment, and
//! rendering; it hands each parsed invocation to one of the handlers here
//! and posts the resulting [`Reply`] back to the invoking user. Every
//! failure mode - oversized count, unparseable mention, authorization
//! refusal, upstream API error - surfaces as an error to be rendered as a
//! reply, never as a crash.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pulse::blocklist::JsonFileStore;
//! use pulse::commands::{self, Deps};
//! use pulse::pace::FixedPacer;
//! use pulse::ranking::SilentProgress;
//! use pulse::slack::SlackClient;
//! use pulse::types::RankParamsBuilder;
//!
//! # async fn example() -> pulse::Result<()> {
//! let api = SlackClient::new("xoxb-bot", "xoxp-user");
//! let store = JsonFileStore::new("blocklist.json");
//! let pacer = FixedPacer::default();
//! let deps = Deps {
//!     api: &api,
//!     store: &store,
//!     pacer: &pacer,
//!     progress: &SilentProgress,
//! };
//!
//! let count = commands::parse_count(Some("250"))?;
//! let params = RankParamsBuilder::default().count(count).build().unwrap();
//! let reply = commands::leaderboard(&deps, "U0INVOKER", params).await?;
//! println!("{}", reply.text());
//! # Ok(())
//! # }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;
use tracing::info;

use crate::blocklist::BlocklistStore;
use crate::error::{Error, Result};
use crate::membership;
use crate::pace::Pacer;
use crate::ranking::{self, ChannelCounts, ProgressNotifier};
use crate::slack::SlackApi;
use crate::types::{Leaderboard, RankParams, RankedChannel, DEFAULT_COUNT, MAX_COUNT};

/// Escaped channel mention as delivered in command text: `<#C123|name>`,
/// with the readable name optional.
static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<#([A-Z0-9]+)(?:\|[^>]*)?>$").expect("Invalid mention pattern"));

/// Bare channel identifier, e.g. `C0123456789`.
static CHANNEL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[CG][A-Z0-9]{6,}$").expect("Invalid channel id pattern"));

/// The capabilities a command invocation runs against.
///
/// All external collaborators are passed explicitly so tests can
/// substitute fakes for any of them.
pub struct Deps<'a> {
    /// Web API access.
    pub api: &'a dyn SlackApi,

    /// Durable blocklist storage.
    pub store: &'a dyn BlocklistStore,

    /// Inter-page courtesy delay.
    pub pacer: &'a dyn Pacer,

    /// Advisory sink for multi-page sweeps.
    pub progress: &'a dyn ProgressNotifier,
}

/// What a finished command sends back to the invoking user.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A ranked leaderboard with topics on the top entries.
    Leaderboard(Leaderboard),

    /// The ranking produced no eligible channels. `fresh` selects the
    /// wording, since the two variants mean different things by "empty".
    Empty { fresh: bool },

    /// A blocklist toggle went through; `blocked` is the channel's new
    /// state.
    Toggled { channel: String, blocked: bool },
}

impl Reply {
    /// Plain-text rendition of the reply.
    ///
    /// Hosts with richer rendering read the [`Leaderboard`] value
    /// directly; this text is the fallback every host can post as-is.
    pub fn text(&self) -> String {
        match self {
            Reply::Leaderboard(board) => {
                let mut out = String::from("Top channels\n");
                for entry in board.top() {
                    let _ = writeln!(out, "<#{}> - {} messages", entry.id, entry.count);
                    if let Some(topic) = entry.topic.as_deref() {
                        if !topic.is_empty() {
                            let _ = writeln!(out, "    {}", topic);
                        }
                    }
                }
                if !board.more().is_empty() {
                    out.push_str("More channels\n");
                    for entry in board.more() {
                        let _ = writeln!(out, "<#{}>", entry.id);
                    }
                }
                if !board.rest().is_empty() {
                    out.push_str("Even more channels\n");
                    let ids: Vec<String> =
                        board.rest().iter().map(|e| format!("<#{}>", e.id)).collect();
                    let _ = writeln!(out, "{}", ids.join(" "));
                }
                out
            }
            Reply::Empty { fresh: false } => {
                "No recent public-channel activity to rank.".to_string()
            }
            Reply::Empty { fresh: true } => {
                "No active channels found that you have not already joined.".to_string()
            }
            Reply::Toggled {
                channel,
                blocked: true,
            } => format!("<#{}> is now blocked from rankings.", channel),
            Reply::Toggled {
                channel,
                blocked: false,
            } => format!("<#{}> is now unblocked and will appear in rankings again.", channel),
        }
    }
}

/// Parses the optional result-count argument.
///
/// Absent means the default sweep size; anything non-numeric is refused
/// rather than silently defaulted; anything above the ceiling is rejected
/// here, before a single API call happens.
///
/// # Examples
///
/// ```rust
/// use pulse::commands::parse_count;
/// use pulse::Error;
///
/// assert_eq!(parse_count(None).unwrap(), 100);
/// assert_eq!(parse_count(Some("250")).unwrap(), 250);
/// assert!(matches!(
///     parse_count(Some("1500")),
///     Err(Error::CountTooLarge { .. })
/// ));
/// assert!(matches!(parse_count(Some("many")), Err(Error::Parse(_))));
/// ```
pub fn parse_count(arg: Option<&str>) -> Result<u32> {
    let Some(raw) = arg.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_COUNT);
    };

    let count: u32 = raw
        .parse()
        .map_err(|_| Error::parse(format!("result count must be a number, got '{}'", raw)))?;

    if count > MAX_COUNT {
        return Err(Error::count_too_large(count, MAX_COUNT));
    }

    Ok(count)
}

/// Extracts a channel id from the toggle command's argument.
///
/// Accepts the escaped mention form (`<#C123|name>`) the platform
/// delivers, or a bare id. Anything else is refused.
///
/// # Examples
///
/// ```rust
/// use pulse::commands::parse_channel_mention;
///
/// assert_eq!(
///     parse_channel_mention("<#C0123456789|general>").unwrap(),
///     "C0123456789"
/// );
/// assert_eq!(parse_channel_mention("C0123456789").unwrap(), "C0123456789");
/// assert!(parse_channel_mention("general").is_err());
/// ```
pub fn parse_channel_mention(arg: &str) -> Result<String> {
    let arg = arg.trim();

    if let Some(captures) = MENTION.captures(arg) {
        return Ok(captures[1].to_string());
    }
    if CHANNEL_ID.is_match(arg) {
        return Ok(arg.to_string());
    }

    Err(Error::parse(format!(
        "could not read a channel from '{}'; mention it like #channel",
        arg
    )))
}

/// Runs one leaderboard invocation.
///
/// Pipeline: load the blocklist, sweep history with blocked channels
/// excluded at the query level, tally and rank, optionally drop channels
/// the invoking user is already in, then decorate the top entries with
/// their topics. A ranking with no eligible channels is a normal reply,
/// not an error.
pub async fn leaderboard(deps: &Deps<'_>, user: &str, params: RankParams) -> Result<Reply> {
    // Always re-read; another invocation may have toggled since.
    let blocklist = deps.store.load().await?;
    let query = ranking::search_query(&blocklist);

    let matches =
        ranking::fetch_matches(deps.api, deps.pacer, deps.progress, &query, params.count).await?;

    let counts = ChannelCounts::from_matches(&matches);
    let mut ranked = counts.ranking();

    if ranked.is_empty() {
        return Ok(Reply::Empty {
            fresh: params.fresh,
        });
    }

    if params.fresh {
        let memberships = membership::member_channel_ids(deps.api, user).await?;
        ranked = membership::retain_unjoined(ranked, &memberships);
        if ranked.is_empty() {
            return Ok(Reply::Empty { fresh: true });
        }
    }

    let topics = ranking::fetch_topics(deps.api, &ranked, params.top_topics).await?;

    let entries: Vec<RankedChannel> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (id, count))| RankedChannel {
            id,
            count,
            topic: topics.get(i).cloned(),
        })
        .collect();

    info!(user = %user, channels = entries.len(), fresh = params.fresh, "built leaderboard");
    Ok(Reply::Leaderboard(Leaderboard { entries }))
}

/// Runs one blocklist toggle invocation.
///
/// The caller must be the channel's creator or a workspace admin;
/// otherwise the operation is refused and nothing is mutated. The store
/// persists the updated set before this returns, so any later `load`
/// observes the change.
pub async fn block(deps: &Deps<'_>, caller: &str, channel_arg: &str) -> Result<Reply> {
    let channel = parse_channel_mention(channel_arg)?;

    authorize_toggle(deps.api, caller, &channel).await?;

    let (_, was_blocked) = deps.store.toggle(&channel).await?;

    info!(caller = %caller, channel = %channel, blocked = !was_blocked, "toggled blocklist");
    Ok(Reply::Toggled {
        channel,
        blocked: !was_blocked,
    })
}

/// Checks that `caller` may toggle `channel`: creator or workspace admin.
async fn authorize_toggle(api: &dyn SlackApi, caller: &str, channel: &str) -> Result<()> {
    let info = api.channel_info(channel).await?;
    if info.creator.as_deref() == Some(caller) {
        return Ok(());
    }

    let user = api.user_info(caller).await?;
    if user.is_admin {
        return Ok(());
    }

    Err(Error::unauthorized(
        "only the channel's creator or a workspace admin can block or unblock it",
    ))
}
