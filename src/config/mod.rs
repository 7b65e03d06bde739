use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Shared staff password checked by the login exchange. Credential
    /// management beyond this single secret is out of scope.
    pub admin_password: String,
    /// Path prefix the route guard protects.
    pub admin_prefix: String,
    /// Where unauthenticated requests to the admin area are redirected.
    pub login_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Source-file ceiling for company logos, before base64 encoding.
    pub max_logo_bytes: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("JOBBOARD_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging =
                v.parse().unwrap_or(self.server.enable_request_logging);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.security.admin_password = v;
        }
        if let Ok(v) = env::var("ADMIN_PREFIX") {
            self.security.admin_prefix = v;
        }
        if let Ok(v) = env::var("LOGIN_PATH") {
            self.security.login_path = v;
        }
        if let Ok(v) = env::var("MAX_LOGO_BYTES") {
            self.upload.max_logo_bytes = v.parse().unwrap_or(self.upload.max_logo_bytes);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: "dev-secret-change-me".to_string(),
                jwt_expiry_hours: 24,
                admin_password: "admin".to_string(),
                admin_prefix: "/admin".to_string(),
                login_path: "/login".to_string(),
            },
            upload: UploadConfig {
                max_logo_bytes: 2 * 1024 * 1024,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                // Must come from the environment in production; an empty
                // secret makes every token verification fail closed.
                jwt_secret: String::new(),
                jwt_expiry_hours: 12,
                admin_password: String::new(),
                admin_prefix: "/admin".to_string(),
                login_path: "/login".to_string(),
            },
            upload: UploadConfig {
                max_logo_bytes: 2 * 1024 * 1024,
            },
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Global configuration singleton, resolved once from the environment.
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults_guard_the_admin_area() {
        let config = AppConfig::development();
        assert_eq!(config.security.admin_prefix, "/admin");
        assert_eq!(config.security.login_path, "/login");
        assert_eq!(config.upload.max_logo_bytes, 2 * 1024 * 1024);
    }
}
