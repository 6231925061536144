use std::time::Duration;

use crate::constants::API_BASE_URL;

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "NEWCOMER_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub api_base_url: String,
    /// None keeps the HTTP client's default timeout behaviour
    pub request_timeout: Option<Duration>,
}

impl CoreConfig {
    pub fn new<S: Into<String>>(api_base_url: S) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Apply `NEWCOMER_API_URL` if it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self {
                api_base_url: url.trim().trim_end_matches('/').to_string(),
                ..self
            },
            _ => self,
        }
    }

    pub fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.api_base_url, route)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}
