use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use jobboard_admin::admin::{ConfirmGate, Notice, Notifier};

/// Shared secrets for the spawned server; tests mint sessions against these.
pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_PASSWORD: &str = "integration-password";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/jobboard-admin");
        cmd.env("JOBBOARD_PORT", port.to_string())
            .env("JWT_SECRET", JWT_SECRET)
            .env("ADMIN_PASSWORD", ADMIN_PASSWORD)
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Obtain a session token from the running server.
#[allow(dead_code)]
pub async fn login(base_url: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let body: serde_json::Value = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({ "user": "staff", "password": ADMIN_PASSWORD }))
        .send()
        .await?
        .json()
        .await?;
    body["data"]["token"]
        .as_str()
        .map(|token| token.to_string())
        .context("login response carried no token")
}

/// Notice sink for driving controllers from integration tests.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: std::sync::Mutex<Vec<Notice>>,
}

#[allow(dead_code)]
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
#[allow(dead_code)]
pub struct Answer(pub bool);

impl ConfirmGate for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
