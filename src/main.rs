use jobboard_admin::{config, server, store::JobStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up JWT_SECRET, ADMIN_PASSWORD, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting job board admin API in {:?} mode", config.environment);

    let app = server::app(JobStore::new());

    // Allow tests or deployments to override port via env
    let port = std::env::var("JOBBOARD_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Job board admin API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
