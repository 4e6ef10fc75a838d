//! Durable set of channels excluded from all rankings.
//!
//! Channel owners and workspace admins can block a channel from appearing
//! on the leaderboard. The set lives in durable storage behind the
//! [`BlocklistStore`] trait: [`JsonFileStore`] persists it as a small JSON
//! document, [`MemoryStore`] backs tests. The set is re-read from storage
//! at the start of every ranking run and never cached across invocations,
//! so concurrent commands always observe the latest state.
//!
//! # Examples
//!
//! ```rust
//! use pulse::blocklist::{BlocklistStore, MemoryStore};
//!
//! # async fn example() -> pulse::Result<()> {
//! let store = MemoryStore::default();
//!
//! let (blocklist, was_blocked) = store.toggle("C0123456789").await?;
//! assert!(!was_blocked);
//! assert!(blocklist.contains("C0123456789"));
//!
//! // Toggling twice restores the original state.
//! let (blocklist, was_blocked) = store.toggle("C0123456789").await?;
//! assert!(was_blocked);
//! assert!(blocklist.is_empty());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;

/// Set of channel identifiers excluded from ranking queries.
///
/// Backed by a `BTreeSet` so iteration order (and therefore the persisted
/// document and the generated query exclusion terms) is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    channels: BTreeSet<String>,
}

impl Blocklist {
    /// Creates an empty blocklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the channel is currently blocked.
    pub fn contains(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    /// Flips a channel in or out of the set.
    ///
    /// Returns `true` when the channel was blocked before the call (and
    /// is now unblocked).
    pub fn toggle(&mut self, channel: &str) -> bool {
        if self.channels.remove(channel) {
            true
        } else {
            self.channels.insert(channel.to_string());
            false
        }
    }

    /// Iterates the blocked channel ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.channels.iter()
    }

    /// Number of blocked channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True when nothing is blocked.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl FromIterator<String> for Blocklist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            channels: iter.into_iter().collect(),
        }
    }
}

/// Persisted document shape: `{"blockedChannels": ["C…", …]}`.
#[derive(Debug, Serialize, Deserialize)]
struct BlocklistDocument {
    #[serde(rename = "blockedChannels")]
    blocked_channels: Vec<String>,
}

impl From<&Blocklist> for BlocklistDocument {
    fn from(blocklist: &Blocklist) -> Self {
        Self {
            blocked_channels: blocklist.iter().cloned().collect(),
        }
    }
}

impl From<BlocklistDocument> for Blocklist {
    fn from(doc: BlocklistDocument) -> Self {
        doc.blocked_channels.into_iter().collect()
    }
}

/// Storage seam for the blocklist.
///
/// `load` runs at the start of every ranking fetch; `toggle` is the only
/// mutation and must persist the full set before returning, so a
/// subsequent `load` in any invocation observes the change.
#[async_trait]
pub trait BlocklistStore: Send + Sync {
    /// Read the current set from durable storage.
    async fn load(&self) -> Result<Blocklist>;

    /// Flip a channel and persist the result.
    ///
    /// Returns the updated set and whether the channel was blocked before
    /// the call.
    async fn toggle(&self, channel: &str) -> Result<(Blocklist, bool)>;
}

/// File-backed store persisting the set as a JSON document.
///
/// A missing file loads as an empty set (first run needs no setup); an
/// unreadable or unparseable file is an error, since silently dropping a
/// blocklist would re-rank channels their owners excluded. Writes go to a
/// temporary file in the same directory followed by a rename, so a
/// concurrent reader never observes a half-written document. The
/// load-mutate-persist sequence of `toggle` runs under a mutex, closing
/// the in-process read-modify-write race between concurrent invocations.
pub struct JsonFileStore {
    path: PathBuf,
    lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Blocklist> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "blocklist file missing, starting empty");
                return Ok(Blocklist::new());
            }
            Err(e) => return Err(e.into()),
        };

        let doc: BlocklistDocument = serde_json::from_slice(&bytes)?;
        Ok(doc.into())
    }

    async fn write(&self, blocklist: &Blocklist) -> Result<()> {
        let doc = BlocklistDocument::from(blocklist);
        let bytes = serde_json::to_vec_pretty(&doc)?;

        // Temp file in the same directory keeps the rename on one filesystem.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl BlocklistStore for JsonFileStore {
    async fn load(&self) -> Result<Blocklist> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn toggle(&self, channel: &str) -> Result<(Blocklist, bool)> {
        let _guard = self.lock.lock().await;
        let mut blocklist = self.read().await?;
        let was_blocked = blocklist.toggle(channel);
        self.write(&blocklist).await?;
        Ok((blocklist, was_blocked))
    }
}

/// In-memory store for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: parking_lot::Mutex<Blocklist>,
}

impl MemoryStore {
    /// Creates a store pre-seeded with the given set.
    pub fn with_blocklist(blocklist: Blocklist) -> Self {
        Self {
            inner: parking_lot::Mutex::new(blocklist),
        }
    }
}

#[async_trait]
impl BlocklistStore for MemoryStore {
    async fn load(&self) -> Result<Blocklist> {
        Ok(self.inner.lock().clone())
    }

    async fn toggle(&self, channel: &str) -> Result<(Blocklist, bool)> {
        let mut guard = self.inner.lock();
        let was_blocked = guard.toggle(channel);
        Ok((guard.clone(), was_blocked))
    }
}
