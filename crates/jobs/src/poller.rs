//! The job poller state machine.
//!
//! Two states per poller instance:
//!
//! - **Idle**: no known non-terminal jobs. Zero network activity until a
//!   `JobCreated` notification (or an explicit refresh) arrives.
//! - **Polling**: at least one job is PENDING/IN_PROGRESS. The job list is
//!   fetched every 500 ms until no non-terminal jobs remain.
//!
//! On every fetch, jobs are compared against their previously observed
//! status; a job that was pending/in-progress and is now COMPLETED or FAILED
//! is announced once via `JobCompleted`, carrying the final record, so
//! consumers (the member list, dashboards) can refresh their own data
//! without polling themselves.
//!
//! Only jobs created within the last 24 hours stay in the visible list;
//! older ones are filtered out client-side.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use memadmin_client::JobsApi;
use memadmin_core::{ClientResult, Job, JobId, JobStatus};
use memadmin_events::{EventBus, Notification, NotificationBus};

/// Fetch cadence while any job is active.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Rolling visibility window for the job list.
pub const RETENTION_WINDOW: chrono::Duration = chrono::Duration::hours(24);

/// One poller per mounted job-list view.
pub struct JobPoller {
    jobs: JobsApi,
    bus: NotificationBus,
}

/// Control handle for a running poller.
///
/// Dropping the handle does not stop the task; call [`PollerHandle::shutdown`].
pub struct PollerHandle {
    jobs: JobsApi,
    shutdown: Arc<Notify>,
    poke: Arc<Notify>,
    snapshot: Arc<RwLock<Vec<Job>>>,
    task: tokio::task::JoinHandle<()>,
}

impl JobPoller {
    pub fn new(jobs: JobsApi, bus: NotificationBus) -> Self {
        Self { jobs, bus }
    }

    /// Spawn the polling task. It performs one immediate fetch to decide its
    /// starting state, then follows the Idle/Polling machine until shutdown.
    pub fn start(self) -> PollerHandle {
        let shutdown = Arc::new(Notify::new());
        let poke = Arc::new(Notify::new());
        let snapshot = Arc::new(RwLock::new(Vec::new()));

        let task = tokio::spawn(run(
            self.jobs.clone(),
            self.bus,
            shutdown.clone(),
            poke.clone(),
            snapshot.clone(),
        ));

        PollerHandle {
            jobs: self.jobs,
            shutdown,
            poke,
            snapshot,
            task,
        }
    }
}

impl PollerHandle {
    /// Latest observed job list (24-hour window, newest first).
    pub fn jobs(&self) -> Vec<Job> {
        self.snapshot.read().map(|jobs| jobs.clone()).unwrap_or_default()
    }

    /// Trigger an immediate out-of-cycle fetch.
    pub fn refresh_now(&self) {
        self.poke.notify_one();
    }

    /// Request cooperative cancellation of a job, then refresh.
    pub async fn cancel(&self, id: JobId) -> ClientResult<()> {
        self.jobs.cancel(id).await?;
        self.refresh_now();
        Ok(())
    }

    /// Dismiss a terminal job from the visible list, then refresh.
    pub async fn dismiss(&self, id: JobId) -> ClientResult<()> {
        self.jobs.delete(id).await?;
        self.refresh_now();
        Ok(())
    }

    /// Stop the polling task. Idempotent.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Wait for the polling task to finish (after [`Self::shutdown`]).
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

async fn run(
    jobs: JobsApi,
    bus: NotificationBus,
    shutdown: Arc<Notify>,
    poke: Arc<Notify>,
    snapshot: Arc<RwLock<Vec<Job>>>,
) {
    tracing::info!("job poller started");

    // The poller holds a bus clone, so this subscription can never observe
    // a closed channel.
    let mut subscription = bus.subscribe();
    let mut known: HashMap<JobId, JobStatus> = HashMap::new();

    let mut interval = tokio::time::interval(POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut polling = false;
    if let Some(any_active) = fetch_once(&jobs, &bus, &mut known, &snapshot).await {
        polling = any_active;
    }

    loop {
        if polling {
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = poke.notified() => {
                    if let Some(any_active) = fetch_once(&jobs, &bus, &mut known, &snapshot).await {
                        polling = any_active;
                    }
                    interval.reset();
                }
                event = subscription.recv() => {
                    if matches!(event, Ok(Notification::JobCreated { .. })) {
                        if let Some(any_active) = fetch_once(&jobs, &bus, &mut known, &snapshot).await {
                            polling = any_active;
                        }
                        interval.reset();
                    }
                }
                _ = interval.tick() => {
                    if let Some(any_active) = fetch_once(&jobs, &bus, &mut known, &snapshot).await {
                        polling = any_active;
                    }
                }
            }
            if !polling {
                tracing::debug!("no active jobs, polling stopped");
            }
        } else {
            // Idle: no timer arm. Nothing is fetched until a job is created
            // or someone asks.
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = poke.notified() => {
                    interval.reset();
                    if let Some(any_active) = fetch_once(&jobs, &bus, &mut known, &snapshot).await {
                        polling = any_active;
                    }
                }
                event = subscription.recv() => {
                    if matches!(event, Ok(Notification::JobCreated { .. })) {
                        tracing::debug!("job created, polling resumed");
                        interval.reset();
                        if let Some(any_active) = fetch_once(&jobs, &bus, &mut known, &snapshot).await {
                            polling = any_active;
                        }
                    }
                }
            }
        }
    }

    tracing::info!("job poller stopped");
}

/// One fetch cycle: filter to the retention window, announce completions,
/// refresh the snapshot. Returns whether any job is still active, or `None`
/// when the fetch failed (state is kept and the next cycle retries).
async fn fetch_once(
    jobs: &JobsApi,
    bus: &NotificationBus,
    known: &mut HashMap<JobId, JobStatus>,
    snapshot: &Arc<RwLock<Vec<Job>>>,
) -> Option<bool> {
    let list = match jobs.list().await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("failed to fetch jobs: {e}");
            return None;
        }
    };

    let now = Utc::now();
    let mut recent: Vec<Job> = list
        .into_iter()
        .filter(|job| job.created_within(RETENTION_WINDOW, now))
        .collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    for job in &recent {
        let was_active = known.get(&job.id).is_some_and(JobStatus::is_active);
        let finished = matches!(job.status, JobStatus::Completed | JobStatus::Failed);
        if was_active && finished {
            tracing::info!(job_id = %job.id, job_type = job.job_type.as_str(), "job completed");
            bus.publish(Notification::JobCompleted {
                job: Box::new(job.clone()),
            });
        }
    }

    known.clear();
    known.extend(recent.iter().map(|job| (job.id, job.status)));

    let any_active = recent.iter().any(|job| job.status.is_active());
    if let Ok(mut current) = snapshot.write() {
        *current = recent;
    }
    Some(any_active)
}
