use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ConfirmGate, Notice, Notifier};
use crate::client::{ClientError, JobsApi};
use crate::model::JobRecord;

/// Dashboard state: the job table and its delete flow.
#[derive(Debug, Default)]
pub struct ListController {
    jobs: Vec<JobRecord>,
    loading: bool,
}

/// Render contract for the table body. An empty collection renders an
/// explicit empty-state row, never a bare table.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Rows(Vec<JobRow>),
}

/// One table row: the columns the dashboard shows.
#[derive(Debug, PartialEq, Eq)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub posted: DateTime<Utc>,
}

impl ListController {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            loading: true,
        }
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Initial fetch. A failure leaves the table empty and is only logged;
    /// the dashboard still renders. Loading always clears.
    pub async fn load(&mut self, api: &dyn JobsApi) {
        match api.list().await {
            Ok(jobs) => self.jobs = jobs,
            Err(e) => tracing::error!("failed to fetch jobs: {}", e),
        }
        self.loading = false;
    }

    /// Delete flow: confirm, call, then prune the local row on success
    /// without re-fetching. On failure the local state is left alone.
    pub async fn delete(
        &mut self,
        api: &dyn JobsApi,
        id: Uuid,
        gate: &dyn ConfirmGate,
        notifier: &dyn Notifier,
    ) {
        if !gate.confirm("Are you sure you want to delete this job?") {
            return;
        }

        match api.delete(id).await {
            Ok(()) => {
                self.jobs.retain(|job| job.id != id);
                notifier.notify(Notice::Success("Job deleted.".to_string()));
            }
            Err(ClientError::Network(_)) => {
                notifier.notify(Notice::Error("Error deleting job.".to_string()));
            }
            Err(_) => {
                notifier.notify(Notice::Error("Failed to delete.".to_string()));
            }
        }
    }

    pub fn view(&self) -> ListView {
        if self.loading {
            return ListView::Loading;
        }
        if self.jobs.is_empty() {
            return ListView::Empty;
        }
        ListView::Rows(
            self.jobs
                .iter()
                .map(|job| JobRow {
                    id: job.id,
                    title: job.title.clone(),
                    company: job.company.clone(),
                    posted: job.created_at,
                })
                .collect(),
        )
    }
}
