//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is intentionally lightweight:
//!
//! - **Fire-and-forget**: publishing never blocks and never fails on absent
//!   subscribers; an event published with nobody listening is gone.
//! - **No persistence, no replay**: subscribers only see events published
//!   after they subscribed.
//! - **Lossy under lag**: a subscriber that falls behind the channel
//!   capacity misses events (`RecvError::Lagged`). Consumers treat the bus
//!   as a change signal and re-fetch state, so missed events are recovered
//!   by the next fetch.
//! - Within one event kind, delivery order matches emission order; across
//!   kinds there is no ordering guarantee.

use std::sync::Arc;

use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// A live subscription to a bus.
///
/// Each subscription receives a copy of every message published after it was
/// created (broadcast semantics).
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: broadcast::Receiver<M>,
}

impl<M: Clone> Subscription<M> {
    pub fn new(receiver: broadcast::Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Wait for the next message.
    pub async fn recv(&mut self) -> Result<M, RecvError> {
        self.receiver.recv().await
    }

    /// Receive a message without waiting.
    pub fn try_recv(&mut self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }
}

/// Domain-agnostic pub/sub seam.
///
/// Kept as a trait so components advertise "publishes X"/"reacts to X"
/// without hardwiring the transport; the in-process implementation is
/// [`BroadcastBus`], but the contract would hold for a socket-backed one.
pub trait EventBus<M>: Send + Sync {
    fn publish(&self, message: M);

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    fn publish(&self, message: M) {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

/// In-process bus over a lossy `tokio::sync::broadcast` channel.
#[derive(Debug, Clone)]
pub struct BroadcastBus<M> {
    sender: broadcast::Sender<M>,
}

impl<M: Clone + Send + 'static> BroadcastBus<M> {
    /// Default channel capacity before slow subscribers start lagging.
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<M: Clone + Send + 'static> Default for BroadcastBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone + Send + 'static> EventBus<M> for BroadcastBus<M> {
    fn publish(&self, message: M) {
        // send() errs only when there are zero receivers; for a
        // fire-and-forget bus that is not an error.
        let _ = self.sender.send(message);
    }

    fn subscribe(&self) -> Subscription<M> {
        Subscription::new(self.sender.subscribe())
    }
}
