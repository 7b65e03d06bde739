use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult};
use crate::model::{JobDraft, JobRecord};
use crate::store::JobStore;

/// GET /api/jobs - List the full collection in storage order
///
/// This is also the lookup path for single records: clients scan the
/// returned array by id. There is deliberately no by-id route.
pub async fn list(State(store): State<JobStore>) -> ApiResult<Vec<JobRecord>> {
    let jobs = store.select_all().await;
    Ok(ApiResponse::success(jobs))
}

/// POST /api/jobs - Create one posting from a draft
pub async fn create(
    State(store): State<JobStore>,
    Json(draft): Json<JobDraft>,
) -> ApiResult<JobRecord> {
    // Reject before touching the store; partial records are never persisted.
    draft.validate()?;

    let record = store.create_one(draft).await;
    tracing::info!(id = %record.id, title = %record.title, "job created");
    Ok(ApiResponse::created(record))
}

/// Update payload: the record id plus the full mutable field set.
#[derive(Debug, Deserialize)]
pub struct UpdateJob {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: JobDraft,
}

/// PUT /api/jobs - Replace the mutable fields of the record with the given id
///
/// Returns no updated-record echo; clients treat a 2xx as done.
pub async fn update(
    State(store): State<JobStore>,
    Json(payload): Json<UpdateJob>,
) -> ApiResult<Value> {
    payload.fields.validate()?;

    store.update_one(payload.id, payload.fields).await?;
    tracing::info!(id = %payload.id, "job updated");
    Ok(ApiResponse::success(Value::Null))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Uuid,
}

/// DELETE /api/jobs?id=<id> - Remove one posting
///
/// Deleting an id that is already gone is a 404, not a crash; repeating a
/// delete fails cleanly.
pub async fn delete(
    State(store): State<JobStore>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<Value> {
    store.delete_one(query.id).await?;
    tracing::info!(id = %query.id, "job deleted");
    Ok(ApiResponse::success(Value::Null))
}
