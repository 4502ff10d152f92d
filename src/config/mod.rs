use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub identity: IdentityConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection settings for the upstream cloud identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub enable_cors: bool,
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
        // Identity service overrides
        if let Ok(v) = env::var("IDENTITY_SERVICE_URL") {
            self.identity.base_url = v;
        }
        if let Ok(v) = env::var("IDENTITY_REQUEST_TIMEOUT_SECS") {
            self.identity.request_timeout_secs = v.parse().unwrap_or(self.identity.request_timeout_secs);
        }
        if let Ok(v) = env::var("IDENTITY_CONNECT_TIMEOUT_SECS") {
            self.identity.connect_timeout_secs = v.parse().unwrap_or(self.identity.connect_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            identity: IdentityConfig {
                base_url: "http://localhost:8081".to_string(),
                request_timeout_secs: 30,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            identity: IdentityConfig {
                base_url: "https://identity.staging.example.com".to_string(),
                request_timeout_secs: 10,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            identity: IdentityConfig {
                base_url: "https://identity.example.com".to_string(),
                request_timeout_secs: 5,
                connect_timeout_secs: 2,
            },
            api: ApiConfig {
                enable_request_logging: false,
                enable_cors: true,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
