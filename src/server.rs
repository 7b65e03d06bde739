use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{jobs, pages, session};
use crate::store::JobStore;

/// Assemble the full router over a shared job collection.
pub fn app(store: JobStore) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", get(pages::login_page))
        // Public auth routes
        .merge(session_routes())
        // The CRUD collection sits outside the guarded prefix
        .merge(jobs_routes())
        // Guarded admin pages
        .merge(admin_routes())
        // Global middleware; the guard filters on path itself
        .layer(middleware::from_fn(crate::middleware::session_guard))
        .layer(CorsLayer::permissive());

    if config::config().server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(store)
}

fn jobs_routes() -> Router<JobStore> {
    Router::new().route(
        "/api/jobs",
        get(jobs::list)
            .post(jobs::create)
            .put(jobs::update)
            .delete(jobs::delete),
    )
}

fn admin_routes() -> Router<JobStore> {
    Router::new()
        .route("/admin", get(pages::dashboard))
        .route("/admin/add", get(pages::add_job))
        .route("/admin/edit/:id", get(pages::edit_job))
}

fn session_routes() -> Router<JobStore> {
    Router::new()
        .route("/auth/login", post(session::login))
        .route("/auth/logout", post(session::logout))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Job Board Admin API",
            "version": version,
            "description": "Administrative backend for a job-listing board",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "/login (public), POST /auth/login, POST /auth/logout",
                "jobs": "/api/jobs (GET, POST, PUT, DELETE?id=)",
                "admin": "/admin, /admin/add, /admin/edit/:id (session required)",
            }
        }
    }))
}

async fn health(State(store): State<JobStore>) -> axum::response::Json<Value> {
    let now = chrono::Utc::now();
    let jobs = store.select_all().await.len();

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "jobs": jobs,
        }
    }))
}
