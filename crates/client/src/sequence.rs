//! Request-generation guard for paginated fetches.
//!
//! Rapid successive fetches (fast pagination clicks) can complete out of
//! order; without a guard a slow page-1 response can overwrite a fast
//! page-2 one. Callers take a ticket before issuing a fetch and check it
//! after awaiting: a stale ticket means a newer fetch superseded this one
//! and its response must be dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic fetch-generation counter. One per independently paginated view.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    current: AtomicU64,
}

/// Proof of which fetch generation a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, invalidating every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` still belongs to the newest fetch.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
