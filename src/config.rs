//! Environment-based configuration for the library's own needs.
//!
//! The host service decides how it configures itself; this module only
//! covers what the crate cannot work without: the two API tokens and the
//! blocklist location.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default location of the persisted blocklist.
pub const DEFAULT_BLOCKLIST_PATH: &str = "blocklist.json";

/// Runtime configuration.
///
/// `search.messages` requires a user token; the metadata and membership
/// methods use the bot token, so both are mandatory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token (`xoxb-…`).
    pub bot_token: String,

    /// User token (`xoxp-…`) for history search.
    pub user_token: String,

    /// Where the blocklist document lives.
    pub blocklist_path: PathBuf,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// Reads `SLACK_BOT_TOKEN` and `SLACK_USER_TOKEN` (both required) and
    /// `PULSE_BLOCKLIST_PATH` (optional, defaults to
    /// [`DEFAULT_BLOCKLIST_PATH`]).
    ///
    /// # Errors
    ///
    /// [`Error::Config`] naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: require("SLACK_BOT_TOKEN")?,
            user_token: require("SLACK_USER_TOKEN")?,
            blocklist_path: env::var("PULSE_BLOCKLIST_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BLOCKLIST_PATH)),
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::config(format!("{} must be set", name)))
}
