// Page descriptor endpoints for the admin area and the login target.
//
// Rendering is out of scope for this backend; these routes exist so the
// admin route surface is real and the guard has something to protect. Each
// returns a small JSON descriptor naming the page and the data route the
// client drives it with.

use axum::{extract::Path, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Session;

/// GET /admin - Dashboard (job table) page descriptor
pub async fn dashboard(Extension(session): Extension<Session>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "page": "admin/dashboard",
            "user": session.user,
            "jobs": "/api/jobs",
        }
    }))
}

/// GET /admin/add - New-posting form page descriptor
pub async fn add_job(Extension(session): Extension<Session>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "page": "admin/add",
            "user": session.user,
            "submit": { "method": "POST", "path": "/api/jobs" },
        }
    }))
}

/// GET /admin/edit/:id - Edit form page descriptor
pub async fn edit_job(
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "page": "admin/edit",
            "user": session.user,
            "id": id,
            "submit": { "method": "PUT", "path": "/api/jobs" },
        }
    }))
}

/// GET /login - Public login page descriptor, the guard's redirect target
pub async fn login_page() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "page": "login",
            "submit": { "method": "POST", "path": "/auth/login" },
        }
    }))
}
