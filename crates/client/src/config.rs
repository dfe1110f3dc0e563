//! Client configuration.

use std::env;
use std::time::Duration;

/// Where and how the action layer reaches the API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix
    pub api_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            api_url: env::var("ESTATE_API_URL").unwrap_or(defaults.api_url),
            timeout: env::var("ESTATE_API_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}
