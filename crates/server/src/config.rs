//! Server configuration.

use std::env;
use std::str::FromStr;

use common::{CacheConfig, DatabaseConfig, RateLimitConfig, ServiceConfig, SessionConfig};
use domain::DEFAULT_PAGE_SIZE;

/// Which document store backs the controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Postgres via SeaORM, key-value entries in Redis
    #[default]
    Postgres,
    /// Everything in process memory
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub store_backend: StoreBackend,
    /// Page size used when a list request omits `limit`
    pub default_page_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            session: SessionConfig::default(),
            rate_limit: RateLimitConfig::default(),
            store_backend: StoreBackend::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.service.host),
                port: parsed("SERVER_PORT").unwrap_or(defaults.service.port),
                ..defaults.service
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                ..defaults.database
            },
            cache: CacheConfig {
                url: env::var("REDIS_URL").unwrap_or(defaults.cache.url),
                ..defaults.cache
            },
            session: SessionConfig {
                secret: env::var("SESSION_SECRET").unwrap_or(defaults.session.secret),
                ..defaults.session
            },
            rate_limit: RateLimitConfig {
                max_requests: parsed("RATE_LIMIT_REQUESTS")
                    .unwrap_or(defaults.rate_limit.max_requests),
                window_seconds: parsed("RATE_LIMIT_WINDOW_SECONDS")
                    .unwrap_or(defaults.rate_limit.window_seconds),
            },
            store_backend: parsed("STORE_BACKEND").unwrap_or_default(),
            default_page_size: parsed("DEFAULT_PAGE_SIZE").unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}
