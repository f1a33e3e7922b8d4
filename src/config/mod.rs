use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Name of the http-only cookie carrying the admin session token.
pub const SESSION_COOKIE_NAME: &str = "treepz_admin_token";

/// Session cookie lifetime, in days.
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Every page under this prefix requires the session cookie.
pub const ADMIN_PATH_PREFIX: &str = "/admin";

/// Where unauthenticated admin requests are redirected (the login page).
pub const LOGIN_PATH: &str = "/";

/// Currency every upstream amount is expressed in.
pub const HOME_CURRENCY: &str = "NGN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub rates: RatesConfig,
    pub security: SecurityConfig,
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
    pub assets_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Booking/payment backend; always stored with a trailing slash.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    pub provider_url: String,
    pub api_key: String,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub secure_cookies: bool,
    pub cors_origins: Vec<String>,
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
        if let Some(port) = env::var("TREEPZ_ADMIN_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("ADMIN_ASSETS_DIR") {
            self.server.assets_dir = PathBuf::from(v);
        }

        if let Ok(v) = env::var("ADMIN_API_BASE_URL") {
            self.upstream.base_url = v;
        }

        if let Ok(v) = env::var("EXCHANGE_RATE_BASE_URL") {
            self.rates.provider_url = v;
        }
        if let Ok(v) = env::var("EXCHANGE_RATE_API_KEY") {
            self.rates.api_key = v;
        }
        if let Ok(v) = env::var("EXCHANGE_RATE_CACHE_SECS") {
            self.rates.cache_ttl_secs = v.parse().unwrap_or(self.rates.cache_ttl_secs);
        }

        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.security.secure_cookies = v.parse().unwrap_or(self.security.secure_cookies);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self.normalized()
    }

    /// Upstream paths are joined onto the base, so it must end with `/`.
    pub fn normalized(mut self) -> Self {
        if !self.upstream.base_url.ends_with('/') {
            self.upstream.base_url.push('/');
        }
        self.rates.provider_url = self.rates.provider_url.trim_end_matches('/').to_string();
        self
    }

    /// Point the config at a different upstream backend.
    pub fn with_upstream(mut self, base_url: impl Into<String>) -> Self {
        self.upstream.base_url = base_url.into();
        self.normalized()
    }

    /// Point the config at a different exchange-rate provider.
    pub fn with_rate_provider(mut self, provider_url: impl Into<String>) -> Self {
        self.rates.provider_url = provider_url.into();
        self.normalized()
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                assets_dir: PathBuf::from("public"),
            },
            upstream: UpstreamConfig {
                base_url: "http://localhost:8080/api/v1/".to_string(),
            },
            rates: RatesConfig {
                provider_url: "https://api.exchangerate-api.com/v4/latest".to_string(),
                api_key: String::new(),
                cache_ttl_secs: 3600,
            },
            security: SecurityConfig {
                secure_cookies: false,
                cors_origins: Vec::new(),
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.security.cors_origins = vec!["https://staging-admin.treepz.com".to_string()];
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.security = SecurityConfig {
            secure_cookies: true,
            cors_origins: vec!["https://admin.treepz.com".to_string()],
        };
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
