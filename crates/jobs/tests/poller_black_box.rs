//! Black-box tests for the job poller against a scripted stub backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::{Value, json};

use memadmin_auth::{InMemoryTokenStore, TokenPair, TokenStore};
use memadmin_client::{ApiClient, ClientConfig};
use memadmin_core::{JobId, JobStatus};
use memadmin_events::{EventBus, Notification, NotificationBus};
use memadmin_jobs::JobPoller;

/// Serves `/jobs` from a mutable script: pending jobs flip to COMPLETED once
/// `complete_after_fetches` fetches happened. `/members/bulk-delete` enqueues
/// a pending job and re-arms completion two fetches later.
struct StubState {
    fetches: AtomicUsize,
    jobs: Mutex<Vec<Value>>,
    complete_after_fetches: AtomicUsize,
}

fn pending_job(id: JobId, total_items: u64) -> Value {
    json!({
        "id": id,
        "type": "BULK_DELETE",
        "status": "PENDING",
        "totalItems": total_items,
        "processedItems": 0,
        "successfulItems": 0,
        "failedItems": 0,
        "progress": 0,
        "createdAt": chrono::Utc::now().to_rfc3339()
    })
}

fn complete(job: &mut Value) {
    let total = job["totalItems"].as_u64().unwrap_or(0);
    job["status"] = json!("COMPLETED");
    job["processedItems"] = json!(total);
    job["successfulItems"] = json!(total);
    job["progress"] = json!(100);
    job["completedAt"] = json!(chrono::Utc::now().to_rfc3339());
}

async fn list_jobs(State(state): State<Arc<StubState>>) -> Json<Value> {
    let fetches = state.fetches.fetch_add(1, Ordering::SeqCst) + 1;

    let mut jobs = state.jobs.lock().unwrap();
    if fetches >= state.complete_after_fetches.load(Ordering::SeqCst) {
        for job in jobs.iter_mut() {
            if job["status"] == "PENDING" || job["status"] == "IN_PROGRESS" {
                complete(job);
            }
        }
    }
    Json(json!(*jobs))
}

async fn bulk_delete(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let ids = body["ids"].as_array().map(Vec::len).unwrap_or(0) as u64;
    let job = pending_job(JobId::new(), ids);

    state.jobs.lock().unwrap().push(job.clone());
    let fetched = state.fetches.load(Ordering::SeqCst);
    state
        .complete_after_fetches
        .store(fetched + 2, Ordering::SeqCst);

    Json(job)
}

struct TestServer {
    state: Arc<StubState>,
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jobs: Vec<Value>, complete_after_fetches: usize) -> Self {
        memadmin_observability::init();
        let state = Arc::new(StubState {
            fetches: AtomicUsize::new(0),
            jobs: Mutex::new(jobs),
            complete_after_fetches: AtomicUsize::new(complete_after_fetches),
        });
        let app = Router::new()
            .route("/jobs", get(list_jobs))
            .route("/members/bulk-delete", axum::routing::post(bulk_delete))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url,
            handle,
        }
    }

    fn api(&self, bus: NotificationBus) -> ApiClient {
        let tokens = Arc::new(InMemoryTokenStore::new());
        tokens
            .store(TokenPair::new("valid-access", "valid-refresh"))
            .unwrap();
        ApiClient::new(
            ClientConfig::new(&self.base_url),
            tokens as Arc<dyn TokenStore>,
            bus,
        )
        .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn next_completion(
    subscription: &mut memadmin_events::Subscription<Notification>,
) -> memadmin_core::Job {
    loop {
        let event = tokio::time::timeout(Duration::from_secs(5), subscription.recv())
            .await
            .expect("timed out waiting for a job notification")
            .expect("bus closed");
        if let Notification::JobCompleted { job } = event {
            return *job;
        }
    }
}

#[tokio::test]
async fn pending_to_completed_transition_emits_exactly_one_notification() {
    let job_id = JobId::new();
    let srv = TestServer::spawn(vec![pending_job(job_id, 3)], 2).await;

    let bus = NotificationBus::new();
    let mut subscription = bus.subscribe();
    let handle = JobPoller::new(srv.api(bus.clone()).jobs(), bus.clone()).start();

    let completed = next_completion(&mut subscription).await;
    assert_eq!(completed.id, job_id);
    assert_eq!(completed.status, JobStatus::Completed);
    assert_eq!(completed.successful_items, 3);

    // Let a few more cycles run: the completion must not be re-announced.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    loop {
        match subscription.try_recv() {
            Ok(Notification::JobCompleted { job }) => {
                panic!("job {} announced twice", job.id)
            }
            Ok(_) => continue,
            Err(_) => break,
        }
    }

    // The terminal job is still visible in the snapshot.
    let visible = handle.jobs();
    assert_eq!(visible.len(), 1);
    assert!(visible[0].status.is_terminal());

    handle.shutdown();
    handle.join().await;
}

#[tokio::test]
async fn poller_goes_quiet_once_no_job_is_active() {
    let srv = TestServer::spawn(vec![pending_job(JobId::new(), 1)], 2).await;

    let bus = NotificationBus::new();
    let mut subscription = bus.subscribe();
    let handle = JobPoller::new(srv.api(bus.clone()).jobs(), bus.clone()).start();

    let _ = next_completion(&mut subscription).await;

    // Give the poller time to observe quiescence, then measure.
    tokio::time::sleep(Duration::from_millis(700)).await;
    let settled = srv.state.fetches.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(
        srv.state.fetches.load(Ordering::SeqCst),
        settled,
        "idle poller must not fetch"
    );

    // A job-created notification wakes it for an immediate fetch.
    bus.publish(Notification::JobCreated { job_id: JobId::new() });
    let mut woke = false;
    for _ in 0..50 {
        if srv.state.fetches.load(Ordering::SeqCst) > settled {
            woke = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(woke, "job-created notification must trigger a fetch");

    handle.shutdown();
    handle.join().await;
}

#[tokio::test]
async fn stale_jobs_are_filtered_out_of_the_visible_list() {
    let fresh_id = JobId::new();
    let mut stale = pending_job(JobId::new(), 1);
    complete(&mut stale);
    stale["createdAt"] = json!((chrono::Utc::now() - chrono::Duration::hours(30)).to_rfc3339());

    let mut fresh = pending_job(fresh_id, 1);
    complete(&mut fresh);

    let srv = TestServer::spawn(vec![stale, fresh], 0).await;

    let bus = NotificationBus::new();
    let handle = JobPoller::new(srv.api(bus.clone()).jobs(), bus.clone()).start();

    // Initial fetch happens on start; wait for the snapshot to fill.
    let mut visible = Vec::new();
    for _ in 0..50 {
        visible = handle.jobs();
        if !visible.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(visible.len(), 1, "the 30-hour-old job must be hidden");
    assert_eq!(visible[0].id, fresh_id);

    handle.shutdown();
    handle.join().await;
}

#[tokio::test]
async fn bulk_delete_flow_completes_with_counts_intact() {
    // End to end: enqueue a bulk delete of 3 members, announce it, watch
    // the poller observe PENDING and then COMPLETED with all counts intact.
    let srv = TestServer::spawn(vec![], usize::MAX).await;

    let bus = NotificationBus::new();
    let mut subscription = bus.subscribe();
    let api = srv.api(bus.clone());
    let handle = JobPoller::new(api.jobs(), bus.clone()).start();

    // Idle at first (empty list). Enqueue the job the way a member view
    // would, then announce it so the poller fetches out of cycle.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let ids = [
        memadmin_core::MemberId::new(),
        memadmin_core::MemberId::new(),
        memadmin_core::MemberId::new(),
    ];
    let job = api.members().bulk_delete(&ids).await.unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.total_items, 3);

    bus.publish(Notification::JobCreated { job_id: job.id });

    let completed = next_completion(&mut subscription).await;
    assert_eq!(completed.id, job.id);
    assert_eq!(completed.status, JobStatus::Completed);
    assert_eq!(completed.successful_items, 3);
    assert_eq!(completed.failed_items, 0);

    handle.shutdown();
    handle.join().await;
}
