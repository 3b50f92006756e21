//! Site runtime configuration.
//!
//! A wasm bundle has no process environment, so backend settings are baked
//! in at build time:
//!
//! - `EDUPATH_BACKEND_URL`: base URL of the hosted backend (optional)
//! - `EDUPATH_BACKEND_KEY`: public anon key; required when the URL is set
//! - `EDUPATH_ENROLLMENT_TABLE`: target table, default `enrollments`
//!
//! Missing backend settings are not fatal; the enrollment form reports a
//! failure when submitted.

use prefs::SYNC_CHANNEL_NAME;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_ENROLLMENT_TABLE: &str = "enrollments";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("EDUPATH_BACKEND_URL is not an http(s) url: {0}")]
    InvalidUrl(String),
    #[error("EDUPATH_BACKEND_URL is set but {var} is missing")]
    MissingKey { var: &'static str },
    #[error("invalid enrollment table name: {0:?}")]
    InvalidTable(String),
}

/// Hosted table the enrollment form writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub channel_name: String,
    pub backend: Option<BackendConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { channel_name: SYNC_CHANNEL_NAME.to_owned(), backend: None }
    }
}

impl SiteConfig {
    /// Build from the values captured by `option_env!` at compile time.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_values`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("EDUPATH_BACKEND_URL"),
            option_env!("EDUPATH_BACKEND_KEY"),
            option_env!("EDUPATH_ENROLLMENT_TABLE"),
        )
    }

    /// Validate raw settings. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL does not parse as http(s), the
    /// key is missing while the URL is set, or the table name is not a plain
    /// identifier.
    pub fn from_values(url: Option<&str>, key: Option<&str>, table: Option<&str>) -> Result<Self, ConfigError> {
        let Some(url) = non_blank(url) else {
            return Ok(Self::default());
        };

        let parsed = url::Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(url.to_owned()));
        }

        let api_key = non_blank(key).ok_or(ConfigError::MissingKey { var: "EDUPATH_BACKEND_KEY" })?;

        let table = non_blank(table).unwrap_or(DEFAULT_ENROLLMENT_TABLE);
        if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::InvalidTable(table.to_owned()));
        }

        Ok(Self {
            channel_name: SYNC_CHANNEL_NAME.to_owned(),
            backend: Some(BackendConfig {
                base_url: url.trim_end_matches('/').to_owned(),
                api_key: api_key.to_owned(),
                table: table.to_owned(),
            }),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
