use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{self, Session, SessionContext};
use crate::config;

pub const SESSION_COOKIE: &str = "session_token";

/// Path rule for the guarded area: the admin prefix itself, or anything
/// nested under it. `/administrators` is not covered by `/admin`.
pub fn protected_path(path: &str, admin_prefix: &str) -> bool {
    path == admin_prefix
        || path
            .strip_prefix(admin_prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Route guard applied to the whole router.
///
/// Requests outside the admin prefix pass through untouched. Inside it, the
/// session context is resolved and the single redirect rule applies:
/// unauthenticated requests go to the configured login page.
pub async fn session_guard(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let security = &config::config().security;

    if !protected_path(request.uri().path(), &security.admin_prefix) {
        return next.run(request).await;
    }

    let context = resolve_session(&jar, request.headers());
    if !auth::is_authenticated(&context) {
        return Redirect::to(&security.login_path).into_response();
    }

    if let SessionContext::Staff(session) = context {
        request.extensions_mut().insert(session);
    }
    next.run(request).await
}

/// Build the session context for a request: cookie first, then bearer
/// header. Verification is delegated to the token layer; an invalid or
/// missing token is simply an anonymous context.
fn resolve_session(jar: &CookieJar, headers: &HeaderMap) -> SessionContext {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(headers));

    let Some(token) = token else {
        return SessionContext::Anonymous;
    };

    match auth::validate_jwt(&token) {
        Ok(claims) => SessionContext::Staff(Session::from(claims)),
        Err(e) => {
            tracing::debug!("session token rejected: {}", e);
            SessionContext::Anonymous
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
