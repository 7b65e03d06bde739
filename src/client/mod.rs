use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{JobDraft, JobRecord};

/// Client-side failure taxonomy. Transport failures and application
/// rejections are distinct classes; both carry a message the caller can
/// surface verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    Envelope(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// The four-operation contract the admin controllers depend on.
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<JobRecord>, ClientError>;
    async fn create(&self, draft: &JobDraft) -> Result<JobRecord, ClientError>;
    async fn update(&self, id: Uuid, fields: &JobDraft) -> Result<(), ClientError>;
    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;

    /// Lookup-by-id is not a server operation: fetch the collection and
    /// scan it. Every consumer of single records goes through this.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobRecord>, ClientError> {
        let jobs = self.list().await?;
        Ok(jobs.into_iter().find(|job| job.id == id))
    }
}

/// Standard response envelope; failure bodies carry `error` instead of
/// `data`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// HTTP implementation of [`JobsApi`] against a running server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a session token sent as a bearer header on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// POST /auth/login - exchange credentials for a session token.
    pub async fn login(&self, user: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(&json!({ "user": user, "password": password }))
            .send()
            .await?;

        #[derive(Debug, Deserialize)]
        struct LoginData {
            token: String,
        }

        let data: LoginData = decode(response).await?;
        Ok(data.token)
    }
}

/// Read a response as an envelope, mapping failures into the client error
/// taxonomy: non-2xx with a server message becomes `Api`, everything that
/// does not look like the contract becomes `Envelope`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let message = match response.json::<Envelope<serde_json::Value>>().await {
            Ok(envelope) => envelope
                .error
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| ClientError::Envelope(e.to_string()))?;

    if !envelope.success {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope
                .error
                .unwrap_or_else(|| "request failed".to_string()),
        });
    }

    envelope
        .data
        .ok_or_else(|| ClientError::Envelope("missing data field".to_string()))
}

/// Like [`decode`], for operations whose success body carries no payload
/// (update, delete). Only the status and the success flag matter.
async fn decode_empty(response: reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();

    if !status.is_success() {
        let message = match response.json::<Envelope<serde_json::Value>>().await {
            Ok(envelope) => envelope
                .error
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(())
}

#[async_trait]
impl JobsApi for ApiClient {
    async fn list(&self) -> Result<Vec<JobRecord>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/api/jobs").send().await?;
        decode(response).await
    }

    async fn create(&self, draft: &JobDraft) -> Result<JobRecord, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/jobs")
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: Uuid, fields: &JobDraft) -> Result<(), ClientError> {
        // { id, ...fields } per the update contract
        let mut body = serde_json::to_value(fields)
            .map_err(|e| ClientError::Envelope(e.to_string()))?;
        body["id"] = json!(id);

        let response = self
            .request(reqwest::Method::PUT, "/api/jobs")
            .json(&body)
            .send()
            .await?;
        decode_empty(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/jobs?id={}", id))
            .send()
            .await?;
        decode_empty(response).await
    }
}
