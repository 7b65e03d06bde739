// Test doubles and helpers shared by the unit suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::admin::{ConfirmGate, Notice, Notifier};
use crate::client::{ClientError, JobsApi};
use crate::model::{JobDraft, JobRecord};
use crate::server;
use crate::store::JobStore;

/// Failure to inject into the next [`FakeApi`] call.
#[derive(Debug)]
pub enum FailKind {
    Network,
    Api(u16, String),
}

impl FailKind {
    fn into_error(self) -> ClientError {
        match self {
            FailKind::Network => ClientError::Network("connection refused".to_string()),
            FailKind::Api(status, message) => ClientError::Api { status, message },
        }
    }
}

/// In-memory [`JobsApi`] with the same observable semantics as the real
/// server: validation on writes, 404s for unknown ids, insertion order on
/// list. One failure can be staged to fire on the next call.
#[derive(Default)]
pub struct FakeApi {
    jobs: Mutex<Vec<JobRecord>>,
    fail: StdMutex<Option<FailKind>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    /// Stage a failure for the next call, whichever operation it is.
    pub fn fail_next(&self, kind: FailKind) {
        *self.fail.lock().unwrap() = Some(kind);
    }

    fn take_failure(&self) -> Option<ClientError> {
        self.fail.lock().unwrap().take().map(FailKind::into_error)
    }

    pub async fn jobs(&self) -> Vec<JobRecord> {
        self.jobs.lock().await.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobsApi for FakeApi {
    async fn list(&self) -> Result<Vec<JobRecord>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.jobs.lock().await.clone())
    }

    async fn create(&self, draft: &JobDraft) -> Result<JobRecord, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        draft.validate().map_err(|e| ClientError::Api {
            status: 400,
            message: e.to_string(),
        })?;
        let record = JobRecord {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            company: draft.company.clone(),
            company_logo: draft.company_logo.clone(),
            location: draft.location.clone(),
            job_type: draft.job_type,
            experience_level: draft.experience_level,
            description: draft.description.clone(),
            apply_url: draft.apply_url.clone(),
            created_at: Utc::now(),
        };
        self.jobs.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: &JobDraft) -> Result<(), ClientError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        fields.validate().map_err(|e| ClientError::Api {
            status: 400,
            message: e.to_string(),
        })?;
        let mut jobs = self.jobs.lock().await;
        match jobs.iter_mut().find(|job| job.id == id) {
            Some(job) => {
                job.apply_draft(fields.clone());
                Ok(())
            }
            None => Err(ClientError::Api {
                status: 404,
                message: format!("job {} not found", id),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut jobs = self.jobs.lock().await;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        if jobs.len() == before {
            return Err(ClientError::Api {
                status: 404,
                message: format!("job {} not found", id),
            });
        }
        Ok(())
    }
}

/// Valid records with the given titles, in order.
pub fn records(titles: &[&str]) -> Vec<JobRecord> {
    titles
        .iter()
        .map(|title| JobRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            company_logo: String::new(),
            location: "Remote".to_string(),
            job_type: Default::default(),
            experience_level: Default::default(),
            description: String::new(),
            apply_url: "https://acme.io/apply".to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

/// Notice sink that records everything it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: StdMutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Confirmation gate with a fixed answer.
pub struct Answer(pub bool);

impl ConfirmGate for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Serve the full app in-process on an ephemeral port and return its base
/// URL. The task runs until the test process exits.
pub async fn spawn_server() -> String {
    let app = server::app(JobStore::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{}", addr)
}
