//! `memadmin-jobs` — background job polling.
//!
//! Keeps the UI informed of asynchronous job progress (bulk deletes,
//! spreadsheet imports) without manual refresh, while minimizing request
//! volume: the poller only polls while at least one job is pending or in
//! progress, and goes silent the moment none is.

pub mod poller;

pub use poller::{JobPoller, PollerHandle, POLL_INTERVAL, RETENTION_WINDOW};
