//! Latest-pass bookkeeping
//!
//! Several passes may be in flight at once when the origin or store list
//! changes quickly. Each pass takes a ticket when it starts; only the pass
//! holding the newest ticket may publish. A slower, older pass that finishes
//! later is discarded.

use crate::pipeline::PassResult;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Handle issued to a pass when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PassTicket(u64);

impl PassTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Publishes the result of the most recently started pass
#[derive(Debug, Default)]
pub struct PassTracker {
    issued: AtomicU64,
    published: RwLock<Option<PassResult>>,
}

impl PassTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pass, superseding every earlier ticket
    pub fn begin(&self) -> PassTicket {
        PassTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the newest pass
    pub fn is_current(&self, ticket: PassTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Publish a finished pass
    ///
    /// Returns `false` and drops the result when a newer pass has started
    /// since `ticket` was issued.
    pub async fn publish(&self, ticket: PassTicket, result: PassResult) -> bool {
        let mut published = self.published.write().await;
        // checked under the lock so a stale writer cannot slip in after a newer one
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "Discarding stale pass");
            return false;
        }
        *published = Some(result);
        true
    }

    /// Result of the newest published pass
    pub async fn latest(&self) -> Option<PassResult> {
        self.published.read().await.clone()
    }
}
