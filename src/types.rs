//! Core data types for matches, ranking parameters, and leaderboards.
//!
//! This module defines the fundamental data structures used throughout the
//! crate:
//!
//! - [`MessageMatch`] - One historical message record from the search API
//! - [`RankParams`] - Parameters for a leaderboard run
//! - [`Leaderboard`] / [`RankedChannel`] - The ranked result handed back
//!   to the host service for rendering
//!
//! # Examples
//!
//! ```rust
//! use pulse::types::{RankParamsBuilder, DEFAULT_COUNT};
//!
//! let params = RankParamsBuilder::default()
//!     .count(250u32)
//!     .fresh(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.count, 250);
//! assert!(params.fresh);
//! assert_eq!(RankParamsBuilder::default().build().unwrap().count, DEFAULT_COUNT);
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of messages swept per leaderboard run.
pub const DEFAULT_COUNT: u32 = 100;

/// Hard ceiling on the requested message count.
///
/// Requests above this are rejected before any API call is made.
pub const MAX_COUNT: u32 = 1000;

/// Number of top-ranked channels that get their topic fetched.
pub const TOP_TOPICS: usize = 5;

/// Channel reference attached to a search match.
///
/// Slack only guarantees these flags for conversation types the searching
/// user can see; both default to `false` when absent so that anything
/// ambiguous is treated as not-a-public-channel and skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchChannel {
    /// Channel identifier, e.g. `C0123456789`.
    pub id: String,

    /// True for channels (as opposed to DMs and group messages).
    #[serde(default)]
    pub is_channel: bool,

    /// True for private channels.
    #[serde(default)]
    pub is_private: bool,
}

/// One historical message record returned by the search API.
///
/// Read-only and sourced externally; never persisted. Only the fields the
/// ranking pipeline inspects are modeled, everything else in the wire
/// object is ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageMatch {
    /// The conversation the message was posted in, when reported.
    pub channel: Option<MatchChannel>,

    /// Message timestamp, e.g. `1712345678.000200`.
    pub ts: Option<String>,

    /// User that posted the message.
    pub user: Option<String>,
}

/// Parameters for a leaderboard run.
///
/// Uses the builder pattern (via `derive_builder`) so callers only name
/// what they change:
///
/// ```rust
/// use pulse::types::RankParamsBuilder;
///
/// let params = RankParamsBuilder::default()
///     .count(500u32)
///     .build()
///     .unwrap();
/// assert!(!params.fresh);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RankParams {
    /// How many recent messages to sweep. Default 100, ceiling
    /// [`MAX_COUNT`]; validation happens in the command layer before any
    /// request is issued.
    #[builder(default = "DEFAULT_COUNT")]
    pub count: u32,

    /// When set, channels the invoking user is already a member of are
    /// filtered out of the ranking ("fresh" variant).
    #[builder(default)]
    pub fresh: bool,

    /// How many top entries get topic enrichment.
    #[builder(default = "TOP_TOPICS")]
    pub top_topics: usize,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            fresh: false,
            top_topics: TOP_TOPICS,
        }
    }
}

/// One entry of a finished leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct RankedChannel {
    /// Channel identifier.
    pub id: String,

    /// Number of recent messages observed in the channel.
    pub count: u32,

    /// Topic text, fetched for the top entries only. `Some("")` means the
    /// channel exists but has no topic set; `None` means the entry ranked
    /// below the enrichment cutoff.
    pub topic: Option<String>,
}

/// The ranked result of a leaderboard run.
///
/// Sectioning mirrors the reply layout the host renders: the top entries
/// carry topics, the next ten appear as a compact list, and anything
/// beyond that trails at the end.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    /// All ranked entries, descending by count, ties in first-seen order.
    pub entries: Vec<RankedChannel>,
}

impl Leaderboard {
    /// Entries with topic enrichment (the top of the board).
    pub fn top(&self) -> &[RankedChannel] {
        let cut = self.entries.len().min(TOP_TOPICS);
        &self.entries[..cut]
    }

    /// The next ten entries after the top section, if any.
    pub fn more(&self) -> &[RankedChannel] {
        let start = self.entries.len().min(TOP_TOPICS);
        let end = self.entries.len().min(TOP_TOPICS + 10);
        &self.entries[start..end]
    }

    /// Everything past the first fifteen entries.
    pub fn rest(&self) -> &[RankedChannel] {
        let start = self.entries.len().min(TOP_TOPICS + 10);
        &self.entries[start..]
    }

    /// Total number of ranked channels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the ranking produced no eligible channels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
