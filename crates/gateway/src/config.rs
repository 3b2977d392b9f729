use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base url {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        source: url::ParseError,
    },
    #[error("invalid timeout {raw:?}")]
    InvalidTimeout { raw: String },
}

/// Where the assignment service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: Url,
    file_base_url: Url,
    timeout: Duration,
}

impl GatewayConfig {
    /// Build a config from an API base URL such as `http://host:3000/api`.
    ///
    /// Uploaded files are served from the origin of the API URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the URL cannot be parsed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseUrl {
            raw: base_url.to_string(),
            source,
        })?;
        let file_base_url =
            base_url
                .join("/")
                .map_err(|source| ConfigError::InvalidBaseUrl {
                    raw: base_url.to_string(),
                    source,
                })?;
        Ok(Self {
            base_url,
            file_base_url,
            timeout,
        })
    }

    /// Read `QUIZ_API_BASE_URL` and `QUIZ_API_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("QUIZ_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = match env::var("QUIZ_API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Self::new(&base_url, timeout)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the URL cannot be parsed.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ConfigError> {
        Self::new(base_url, self.timeout)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Origin that serves uploaded media and feedback documents.
    #[must_use]
    pub fn file_base_url(&self) -> &Url {
        &self.file_base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            raw: raw.to_string(),
        })
}
