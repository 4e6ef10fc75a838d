//! Pacing between paginated requests.
//!
//! The search API enforces its own rate limit, and violating it fails the
//! whole sweep with a rate-limit error, so the fetcher suspends for a
//! fixed courtesy delay before every page request after the first. The
//! delay is injected through the [`Pacer`] trait so pagination logic can
//! be tested without real time passing.
//!
//! # Examples
//!
//! ```rust
//! use pulse::pace::{FixedPacer, PAGE_DELAY_MS};
//!
//! let pacer = FixedPacer::new(PAGE_DELAY_MS);
//! ```

use async_trait::async_trait;
use std::time::Duration;

/// Delay between successive search pages, in milliseconds.
pub const PAGE_DELAY_MS: u64 = 1500;

/// A point where the pipeline deliberately suspends between requests.
///
/// Production uses [`FixedPacer`]; tests substitute an implementation
/// that counts invocations instead of sleeping.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend the current invocation for one inter-request delay.
    async fn pause(&self);
}

/// Pacer that sleeps for a fixed duration on every pause.
#[derive(Debug, Clone)]
pub struct FixedPacer {
    delay: Duration,
}

impl FixedPacer {
    /// Creates a pacer with the specified delay.
    ///
    /// # Parameters
    ///
    /// * `delay_ms` - Delay per pause in milliseconds
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

impl Default for FixedPacer {
    /// The standard inter-page courtesy delay ([`PAGE_DELAY_MS`]).
    fn default() -> Self {
        Self::new(PAGE_DELAY_MS)
    }
}

#[async_trait]
impl Pacer for FixedPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Pacer that does not sleep at all.
///
/// Only appropriate where pacing happens elsewhere; the search sweep
/// must never run with this against the real API.
#[derive(Debug, Clone, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}
