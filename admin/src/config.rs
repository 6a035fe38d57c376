//! Settings for both binaries, loaded via OrthoConfig.
//!
//! Values merge from defaults, configuration files and the environment.
//! Command-line flags are parsed by each binary's own `clap` parser and
//! applied on top, so the binaries load settings with
//! `load_from_iter([program_name])` instead of the process arguments.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::telemetry::{LogFormat, UnknownLogFormat};

const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Failures turning loaded settings into typed values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The API root is not a URL.
    #[error("invalid api_url `{value}`: {source}")]
    ApiUrl {
        /// Raw configured value.
        value: String,
        /// Parser detail.
        source: url::ParseError,
    },
    /// The bind address is not `host:port`.
    #[error("invalid bind_addr `{value}`: {source}")]
    BindAddr {
        /// Raw configured value.
        value: String,
        /// Parser detail.
        source: std::net::AddrParseError,
    },
    /// A zero timeout would fail every request.
    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
    /// Unsupported log format.
    #[error(transparent)]
    LogFormat(#[from] UnknownLogFormat),
}

/// Settings for the `user-admin` command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_ADMIN")]
pub struct AdminSettings {
    /// Root of the user store API.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
    /// `text` or `json`.
    pub log_format: Option<String>,
}

impl AdminSettings {
    /// Return the configured API root, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a URL.
    pub fn api_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Url::parse(raw).map_err(|source| SettingsError::ApiUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Return the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the timeout is zero.
    pub fn timeout(&self) -> Result<Duration, SettingsError> {
        match self.timeout_secs {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Return the configured log format, falling back to text.
    ///
    /// # Errors
    ///
    /// Returns an error for values other than `text` and `json`.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        parse_log_format(self.log_format.as_deref())
    }
}

/// Settings for the `user-store` development server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_STORE")]
pub struct StoreSettings {
    /// Socket address to listen on.
    #[ortho_config(default = "127.0.0.1:3001".to_owned())]
    pub bind_addr: String,
    /// `text` or `json`.
    pub log_format: Option<String>,
}

impl StoreSettings {
    /// Return the configured listen address.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Return the configured log format, falling back to text.
    ///
    /// # Errors
    ///
    /// Returns an error for values other than `text` and `json`.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        parse_log_format(self.log_format.as_deref())
    }
}

fn parse_log_format(raw: Option<&str>) -> Result<LogFormat, SettingsError> {
    raw.map_or(Ok(LogFormat::default()), str::parse)
        .map_err(SettingsError::from)
}
