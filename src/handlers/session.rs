use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub password: String,
}

/// POST /auth/login - Exchange the staff password for a session token
///
/// The token is returned in the body for header-based clients and set as
/// the session cookie for browser-style navigation through the guard.
pub async fn login(
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<Value>), ApiError> {
    let security = &config::config().security;

    // An unset password locks the exchange rather than opening it.
    if security.admin_password.is_empty() || payload.password != security.admin_password {
        tracing::warn!(user = %payload.user, "rejected login attempt");
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    let token = auth::generate_jwt(Claims::new(payload.user.clone()))
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .build();

    tracing::info!(user = %payload.user, "staff login");
    Ok((
        jar.add(cookie),
        ApiResponse::success(json!({
            "token": token,
            "user": payload.user,
            "expires_in": security.jwt_expiry_hours * 3600,
        })),
    ))
}

/// POST /auth/logout - Drop the session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, ApiResponse<Value>) {
    (
        jar.remove(Cookie::from(SESSION_COOKIE)),
        ApiResponse::success(Value::Null),
    )
}
