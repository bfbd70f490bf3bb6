//! Client configuration: API base URL, HTTP timeouts, and borrow endpoint mode.
//!
//! Defaults target a local backend. Environment overrides are applied by
//! [`ClientConfig::with_env_overrides`]; the CLI layers its own config file and
//! flags on top of that.

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default API base URL (local development backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090/api/v1";
/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default read timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

const MAX_TIMEOUT_SECS: u64 = 3600;

const ENV_BASE_URL: &str = "LIBRARY_API_BASE_URL";
const ENV_CONNECT_TIMEOUT: &str = "LIBRARY_CONNECT_TIMEOUT_SECS";
const ENV_READ_TIMEOUT: &str = "LIBRARY_READ_TIMEOUT_SECS";
const ENV_BORROW_ENDPOINTS: &str = "LIBRARY_BORROW_ENDPOINTS";

/// Errors raised while building or validating a [`ClientConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is empty or not an http(s) URL.
    #[error(
        "invalid base URL '{value}'\n  Suggestion: use an absolute http(s) URL such as http://localhost:8090/api/v1"
    )]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
    },

    /// A timeout is outside the accepted range.
    #[error("invalid value for `{field}`: {value}. Expected range: 1..=3600")]
    InvalidTimeout {
        /// Which timeout field.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// An environment variable could not be parsed.
    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv {
        /// Environment variable name.
        name: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// Unknown borrow endpoint mode label.
    #[error("unknown borrow endpoint mode '{0}' (expected 'by-id' or 'legacy')")]
    UnknownBorrowMode(String),
}

/// Which backend endpoints return/renew operations are dispatched to.
///
/// Both modes first locate the active borrow record; they differ only in the
/// mutating call that follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorrowEndpointMode {
    /// `PUT /borrow/{id}/return` and `PUT /borrow/{id}/renew`.
    #[default]
    ById,
    /// `POST /borrow/return` and `POST /borrow/renew` with `{userId, copyId}`.
    Legacy,
}

impl BorrowEndpointMode {
    /// Returns the stable label used in config files and env vars.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ById => "by-id",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for BorrowEndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorrowEndpointMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by-id" | "by_id" | "id" => Ok(Self::ById),
            "legacy" | "copy" => Ok(Self::Legacy),
            other => Err(ConfigError::UnknownBorrowMode(other.to_string())),
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://localhost:8090/api/v1`.
    pub base_url: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_timeout_secs: u64,
    /// Endpoint family used for return/renew.
    pub borrow_endpoints: BorrowEndpointMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            borrow_endpoints: BorrowEndpointMode::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a default config pointed at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Applies `LIBRARY_*` environment overrides on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is present but unparseable.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    fn apply_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |name| lookup(name).filter(|value: &String| !value.trim().is_empty());

        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = non_empty(ENV_CONNECT_TIMEOUT) {
            self.connect_timeout_secs = parse_env_u64(ENV_CONNECT_TIMEOUT, &raw)?;
        }
        if let Some(raw) = non_empty(ENV_READ_TIMEOUT) {
            self.read_timeout_secs = parse_env_u64(ENV_READ_TIMEOUT, &raw)?;
        }
        if let Some(raw) = non_empty(ENV_BORROW_ENDPOINTS) {
            self.borrow_endpoints = raw.parse()?;
        }
        Ok(self)
    }

    /// Validates base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let trimmed = self.base_url.trim();
        let lower = trimmed.to_ascii_lowercase();
        let has_scheme = lower.starts_with("http://") || lower.starts_with("https://");
        if !has_scheme || url::Url::parse(trimmed).is_err() {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.base_url.clone(),
            });
        }
        validate_timeout("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if (1..=MAX_TIMEOUT_SECS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeout { field, value })
    }
}

fn parse_env_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: raw.to_string(),
    })
}
