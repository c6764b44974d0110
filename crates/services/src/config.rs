use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const API_URL_ENV: &str = "STUDY_API_URL";
pub const API_TIMEOUT_ENV: &str = "STUDY_API_TIMEOUT_SECS";

/// Path of the generation endpoint below the base URL.
pub const PROCESS_PATH: &str = "process";

/// Where and how to reach the generation backend.
///
/// Built once by the binary and passed to the client; nothing below reads the
/// environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    base_url: Url,
    timeout: Duration,
}

impl GenerationConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` when `base_url` does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let raw = base_url.trim();
        let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            raw: raw.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                raw: raw.to_string(),
            });
        }
        Ok(Self {
            base_url: parsed,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `STUDY_API_URL` and `STUDY_API_TIMEOUT_SECS`, falling back to the
    /// local backend and a two-minute timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable URL or timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GenerationConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable URL or timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let config = Self::new(&base_url)?;

        match lookup(API_TIMEOUT_ENV).filter(|value| !value.trim().is_empty()) {
            Some(raw) => {
                let secs = parse_timeout_secs(&raw)?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base_url}/process`, keeping any path prefix on the base URL.
    #[must_use]
    pub fn process_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(PROCESS_PATH);
        }
        url
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` for non-numeric or zero values.
pub fn parse_timeout_secs(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout {
            raw: raw.to_string(),
        }),
    }
}
