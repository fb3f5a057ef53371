//! # Service Bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`AppState`].
//!
//! ## Bootstrap Sequence
//!
//! 1. **Build the region table**: the Canadian district mapping, shared by
//!    the classifier and the file backend.
//! 2. **Open the municipality backend**: connect and migrate SQLite, or
//!    load the per-region JSON files.
//! 3. **Log the service identity**: backend, address, lookup timeout.

use std::sync::Arc;

use pcl_core::{Classifier, FsaResolver, RegionTable};
use sqlx::SqlitePool;

use crate::db;
use crate::db::municipalities::SqlResolver;
use crate::regional_files::{RegionalFileError, RegionalFileResolver};
use crate::state::{AppConfig, AppState, MunicipalityBackend};

/// Errors during bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// SQLite connection or migration failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Regional JSON files could not be loaded.
    #[error(transparent)]
    RegionalFiles(#[from] RegionalFileError),
}

/// Build application state from configuration.
pub async fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let regions = Arc::new(RegionTable::canadian());
    let classifier = Classifier::new(Arc::clone(&regions));

    let (resolver, db_pool): (Arc<dyn FsaResolver>, Option<SqlitePool>) = match &config.backend {
        MunicipalityBackend::Sqlite { database_url } => {
            let pool = db::init_pool(database_url).await?;
            let rows = db::municipalities::count(&pool).await?;
            if rows == 0 {
                tracing::warn!(
                    "municipalities table is empty; every lookup will return 404. \
                     Populate it with `pcl import`."
                );
            } else {
                tracing::info!(rows, "municipalities table ready");
            }
            let resolver: Arc<dyn FsaResolver> = Arc::new(SqlResolver::new(pool.clone()));
            (resolver, Some(pool))
        }
        MunicipalityBackend::Files { data_dir } => {
            let files = RegionalFileResolver::load(data_dir, regions)?;
            if files.is_empty() {
                tracing::warn!(dir = %data_dir.display(), "no municipality entries loaded");
            }
            let resolver: Arc<dyn FsaResolver> = Arc::new(files);
            (resolver, None)
        }
    };

    tracing::info!(
        backend = resolver.backend_name(),
        addr = %config.host_addr,
        lookup_timeout_ms = config.lookup_timeout.as_millis() as u64,
        "postal code lookup service configured"
    );

    Ok(AppState::with_parts(config, classifier, resolver, db_pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sqlite_backend_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            backend: MunicipalityBackend::Sqlite {
                database_url: format!("sqlite://{}", dir.path().join("boot.db").display()),
            },
            ..AppConfig::default()
        };

        let state = bootstrap(config).await.unwrap();
        assert_eq!(state.resolver.backend_name(), "sqlite");
        assert!(state.db_pool.is_some());
    }

    #[tokio::test]
    async fn files_backend_has_no_pool() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("NS.json"), r#"{"B2C":"Iona"}"#).unwrap();
        let config = AppConfig {
            backend: MunicipalityBackend::Files {
                data_dir: dir.path().to_path_buf(),
            },
            ..AppConfig::default()
        };

        let state = bootstrap(config).await.unwrap();
        assert_eq!(state.resolver.backend_name(), "files");
        assert!(state.db_pool.is_none());
    }

    #[tokio::test]
    async fn files_backend_missing_dir_fails() {
        let config = AppConfig {
            backend: MunicipalityBackend::Files {
                data_dir: "/nonexistent/pcl-data".into(),
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            bootstrap(config).await,
            Err(BootstrapError::RegionalFiles(_))
        ));
    }
}
