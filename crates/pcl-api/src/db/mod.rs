//! # Database Persistence Layer
//!
//! SQLite persistence for the FSA → municipality table via SQLx.
//!
//! The `sqlite` backend reads from this table at request time; the
//! `pcl import` command fills it from a directory of per-region JSON
//! files. The schema is applied through embedded migrations, which are
//! written so they also accept databases created by earlier deployments
//! of the service.

pub mod municipalities;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open (creating if necessary) the SQLite database at `url` and run migrations.
///
/// Returns `Err` if the URL is malformed or the connection or migration fails.
pub async fn init_pool(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!(url, "connected to SQLite");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}

/// Open an existing SQLite database at `url` for lookups.
///
/// Unlike [`init_pool`], a missing file is an error and no migrations run.
pub async fn open_existing(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!(url, "opened existing SQLite database");
    Ok(pool)
}

/// Cheap connectivity check used by the readiness probe.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_database_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("municipalities.db");
        let url = format!("sqlite://{}", path.display());

        let pool = init_pool(&url).await.unwrap();
        assert!(path.exists());
        ping(&pool).await.unwrap();
        assert_eq!(municipalities::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("m.db").display());

        let first = init_pool(&url).await.unwrap();
        first.close().await;
        let second = init_pool(&url).await.unwrap();
        ping(&second).await.unwrap();
    }

    #[tokio::test]
    async fn accepts_legacy_table_with_duplicate_fsas() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("legacy.db").display());

        let legacy = SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&url).unwrap().create_if_missing(true),
        )
        .await
        .unwrap();
        sqlx::query("CREATE TABLE Municipalities (id INTEGER PRIMARY KEY, fsa TEXT, municipality TEXT)")
            .execute(&legacy)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO Municipalities (fsa, municipality) \
             VALUES ('K1A', 'Ottawa'), ('K1A', 'Ottawa (dup)'), ('B2C', 'Iona'), (NULL, 'Nowhere')",
        )
        .execute(&legacy)
        .await
        .unwrap();
        legacy.close().await;

        let pool = init_pool(&url).await.unwrap();
        assert_eq!(municipalities::count(&pool).await.unwrap(), 2);
        assert_eq!(
            municipalities::find_by_fsa(&pool, "K1A").await.unwrap().as_deref(),
            Some("Ottawa (dup)")
        );
        municipalities::upsert(&pool, "K1A", "Ottawa").await.unwrap();
        assert_eq!(municipalities::count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn open_existing_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let url = format!("sqlite://{}", path.display());

        assert!(open_existing(&url).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn open_existing_reads_migrated_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("m.db").display());
        let pool = init_pool(&url).await.unwrap();
        municipalities::upsert(&pool, "B2C", "Iona").await.unwrap();
        pool.close().await;

        let pool = open_existing(&url).await.unwrap();
        assert_eq!(
            municipalities::find_by_fsa(&pool, "B2C").await.unwrap().as_deref(),
            Some("Iona")
        );
    }
}
