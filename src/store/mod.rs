use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{JobDraft, JobRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("job {0} not found")]
    NotFound(Uuid),
}

/// Insertion-ordered collection of job postings, keyed by id.
///
/// Handlers are the only callers; everything else reaches the collection
/// through the HTTP contract. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<Vec<JobRecord>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    pub async fn select_all(&self) -> Vec<JobRecord> {
        self.jobs.read().await.clone()
    }

    /// Store a new record. Identity and creation timestamp are assigned
    /// here; v4 ids are never reused after a delete.
    pub async fn create_one(&self, draft: JobDraft) -> JobRecord {
        let record = JobRecord {
            id: Uuid::new_v4(),
            title: draft.title,
            company: draft.company,
            company_logo: draft.company_logo,
            location: draft.location,
            job_type: draft.job_type,
            experience_level: draft.experience_level,
            description: draft.description,
            apply_url: draft.apply_url,
            created_at: Utc::now(),
        };
        self.jobs.write().await.push(record.clone());
        record
    }

    /// Replace the mutable fields of an existing record.
    pub async fn update_one(&self, id: Uuid, draft: JobDraft) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        match jobs.iter_mut().find(|job| job.id == id) {
            Some(job) => {
                job.apply_draft(draft);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Remove a record by id.
    pub async fn delete_one(&self, id: Uuid) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        if jobs.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
