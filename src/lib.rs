//! # Pulse - Channel-activity leaderboard library for Slack workspaces
//!
//! Pulse scans recent public-channel message history through the Slack
//! search API, ranks channels by message volume, and produces a formatted
//! leaderboard for the user who asked. A companion command lets channel
//! owners and workspace admins block specific channels from future
//! rankings, persisted in a small JSON document.
//!
//! ## Features
//!
//! - **Paginated History Sweep**: Accumulates search results page by page
//!   up to a requested count, with a mandatory courtesy delay between
//!   pages to respect the API's rate limit
//! - **Deterministic Ranking**: Channels ordered by descending message
//!   count with a documented first-seen tie-break
//! - **Fresh Variant**: Optionally filters out channels the invoking user
//!   already belongs to, after fully draining their membership listing
//! - **Topic Enrichment**: Fetches topic text for only the top entries
//! - **Durable Blocklist**: Owner/admin-gated toggle persisted atomically,
//!   re-read before every ranking run
//! - **Explicit Capabilities**: API access, storage, pacing, and progress
//!   delivery are all trait seams, so every component is testable with
//!   fakes and no module touches global state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulse::blocklist::JsonFileStore;
//! use pulse::commands::{self, Deps};
//! use pulse::config::Config;
//! use pulse::pace::FixedPacer;
//! use pulse::ranking::SilentProgress;
//! use pulse::slack::SlackClient;
//! use pulse::types::RankParamsBuilder;
//!
//! #[tokio::main]
//! async fn main() -> pulse::Result<()> {
//!     let config = Config::from_env()?;
//!     let api = SlackClient::new(&config.bot_token, &config.user_token);
//!     let store = JsonFileStore::new(&config.blocklist_path);
//!     let pacer = FixedPacer::default();
//!
//!     let deps = Deps {
//!         api: &api,
//!         store: &store,
//!         pacer: &pacer,
//!         progress: &SilentProgress,
//!     };
//!
//!     // A slash command arrived: rank the 250 most recent messages.
//!     let params = RankParamsBuilder::default().count(250u32).build().unwrap();
//!     let reply = commands::leaderboard(&deps, "U0INVOKER", params).await?;
//!     println!("{}", reply.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`commands`]: Slash-command handlers and argument parsing
//! - [`ranking`]: The sweep/aggregate/rank/enrich pipeline
//! - [`membership`]: Cursor-paginated membership drain and filter
//! - [`blocklist`]: Durable excluded-channel set behind a storage seam
//! - [`slack`]: The Web API client seam and its typed results
//! - [`pace`]: Injectable inter-page delay
//! - [`config`]: Environment configuration
//! - [`error`]: Comprehensive error handling
//!
//! Transport, slash-command registration, and Block Kit rendering belong
//! to the host service; the handlers here take parsed invocations and
//! return reply values.

pub mod blocklist;
pub mod commands;
pub mod config;
pub mod error;
pub mod membership;
pub mod pace;
pub mod ranking;
pub mod slack;
pub mod types;

/// Prelude module for convenient imports.
///
/// Re-exports the most commonly used types and traits so hosts can
/// `use pulse::prelude::*;` and wire a command handler in one breath.
pub mod prelude {
    pub use crate::{
        blocklist::{Blocklist, BlocklistStore, JsonFileStore},
        commands::{Deps, Reply},
        pace::{FixedPacer, Pacer},
        ranking::{ChannelCounts, ProgressNotifier, SilentProgress},
        slack::{SlackApi, SlackClient},
        types::{Leaderboard, RankParams, RankParamsBuilder, RankedChannel},
    };
}

// Re-export main types at crate root for direct access
pub use blocklist::{Blocklist, BlocklistStore, JsonFileStore};
pub use error::{Error, Result};
pub use slack::{SlackApi, SlackClient};
pub use types::{Leaderboard, RankParams, RankedChannel};
