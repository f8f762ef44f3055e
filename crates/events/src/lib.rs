//! `memadmin-events` — process-wide notification bus.
//!
//! A typed, injectable publish/subscribe mechanism (not a queue): delivery
//! is fire-and-forget fan-out to whoever is subscribed at publish time, with
//! no buffering of missed events and no replay.

pub mod bus;
pub mod notification;

pub use bus::{BroadcastBus, EventBus, RecvError, Subscription, TryRecvError};
pub use notification::{Notification, NotificationBus};
