//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds the classifier (region table), the municipality resolver
//! chosen at bootstrap, the optional SQLite pool used by the readiness
//! probe, and the runtime configuration. Everything is read-only after
//! startup, so cloning the state per request is a handful of `Arc` bumps.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pcl_core::{Classifier, FsaResolver};
use sqlx::SqlitePool;

/// Default listen address.
pub const DEFAULT_HOST_ADDR: &str = "0.0.0.0:8000";

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://municipalities.db";

/// Default upper bound on a single municipality lookup.
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2000;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{var} must be set when {requires}")]
    Missing {
        var: &'static str,
        requires: &'static str,
    },
}

/// Where municipality names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MunicipalityBackend {
    /// SQLite table `municipalities (fsa, municipality)`.
    Sqlite { database_url: String },
    /// Directory of `<REGION_CODE>.json` files keyed by uppercase FSA.
    Files { data_dir: PathBuf },
}

impl MunicipalityBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } => "sqlite",
            Self::Files { .. } => "files",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("text") => Some(Self::Text),
            Some("json") => Some(Self::Json),
            Some(_) => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind the HTTP server to.
    pub host_addr: SocketAddr,
    /// Municipality backend selected at startup.
    pub backend: MunicipalityBackend,
    /// Upper bound on a single resolver call.
    pub lookup_timeout: Duration,
    /// Formatter for the tracing subscriber installed by the binary.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            backend: MunicipalityBackend::Sqlite {
                database_url: DEFAULT_DATABASE_URL.to_string(),
            },
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    ///
    /// | Variable                | Default                      |
    /// |-------------------------|------------------------------|
    /// | `HOST_ADDR`             | `0.0.0.0:8000`               |
    /// | `MUNICIPALITY_BACKEND`  | `sqlite` (or `files`)        |
    /// | `DATABASE_URL`          | `sqlite://municipalities.db` |
    /// | `MUNICIPALITY_DATA_DIR` | required for `files`         |
    /// | `LOOKUP_TIMEOUT_MS`     | `2000`                       |
    /// | `LOG_FORMAT`            | `text` (or `json`)           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = var("HOST_ADDR").unwrap_or_else(|| DEFAULT_HOST_ADDR.to_string());
        let host_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: "HOST_ADDR",
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        let backend = match var("MUNICIPALITY_BACKEND")
            .map(|b| b.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("sqlite") => MunicipalityBackend::Sqlite {
                database_url: var("DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            },
            Some("files") => MunicipalityBackend::Files {
                data_dir: var("MUNICIPALITY_DATA_DIR")
                    .map(PathBuf::from)
                    .ok_or(ConfigError::Missing {
                        var: "MUNICIPALITY_DATA_DIR",
                        requires: "MUNICIPALITY_BACKEND=files",
                    })?,
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "MUNICIPALITY_BACKEND",
                    value: other.to_string(),
                    reason: "expected `sqlite` or `files`".to_string(),
                })
            }
        };

        let lookup_timeout = match var("LOOKUP_TIMEOUT_MS") {
            None => Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        var: "LOOKUP_TIMEOUT_MS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        var: "LOOKUP_TIMEOUT_MS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        let raw_format = var("LOG_FORMAT");
        let log_format =
            LogFormat::parse(raw_format.as_deref()).ok_or_else(|| ConfigError::InvalidValue {
                var: "LOG_FORMAT",
                value: raw_format.clone().unwrap_or_default(),
                reason: "expected `text` or `json`".to_string(),
            })?;

        Ok(Self {
            host_addr,
            backend,
            lookup_timeout,
            log_format,
        })
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Classifier,
    /// Municipality lookup backend. Shared by every request.
    pub resolver: Arc<dyn FsaResolver>,
    /// SQLite pool when the `sqlite` backend is active; probed by readiness.
    pub db_pool: Option<SqlitePool>,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("resolver", &self.resolver.backend_name())
            .field("db_pool", &self.db_pool.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// State over the Canadian region table and `resolver`, with default config.
    pub fn new(resolver: Arc<dyn FsaResolver>) -> Self {
        Self::with_parts(AppConfig::default(), Classifier::canadian(), resolver, None)
    }

    pub fn with_parts(
        config: AppConfig,
        classifier: Classifier,
        resolver: Arc<dyn FsaResolver>,
        db_pool: Option<SqlitePool>,
    ) -> Self {
        Self {
            classifier,
            resolver,
            db_pool,
            config,
        }
    }
}
