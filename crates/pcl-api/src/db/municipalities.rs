//! Municipality persistence operations.
//!
//! All functions take a `&SqlitePool` and operate on the `municipalities`
//! table. FSAs are stored uppercase.

use async_trait::async_trait;
use pcl_core::{Fsa, FsaResolver, ResolveError};
use sqlx::SqlitePool;

const UPSERT: &str = "INSERT INTO municipalities (fsa, municipality) VALUES (?1, ?2)
     ON CONFLICT (fsa) DO UPDATE SET municipality = excluded.municipality";

/// Municipality name for an uppercase FSA.
pub async fn find_by_fsa(pool: &SqlitePool, fsa: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT municipality FROM municipalities WHERE fsa = ?1")
        .bind(fsa)
        .fetch_optional(pool)
        .await
}

/// Insert or replace the municipality for one FSA.
pub async fn upsert(pool: &SqlitePool, fsa: &str, municipality: &str) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT)
        .bind(fsa.trim().to_ascii_uppercase())
        .bind(municipality)
        .execute(pool)
        .await?;

    Ok(())
}

/// Upsert many rows in a single transaction. Returns the number written.
pub async fn upsert_all<I, K, V>(pool: &SqlitePool, rows: I) -> Result<u64, sqlx::Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for (fsa, municipality) in rows {
        sqlx::query(UPSERT)
            .bind(fsa.as_ref().trim().to_ascii_uppercase())
            .bind(municipality.as_ref())
            .execute(&mut *tx)
            .await?;
        written += 1;
    }

    tx.commit().await?;
    Ok(written)
}

/// Number of rows in the table.
pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM municipalities")
        .fetch_one(pool)
        .await
}

/// [`FsaResolver`] backed by the `municipalities` table.
#[derive(Debug, Clone)]
pub struct SqlResolver {
    pool: SqlitePool,
}

impl SqlResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FsaResolver for SqlResolver {
    async fn resolve(&self, fsa: &Fsa) -> Result<String, ResolveError> {
        let key = fsa.as_upper();
        match find_by_fsa(&self.pool, &key).await {
            Ok(Some(name)) => Ok(name),
            Ok(None) => Err(ResolveError::NotFound(key)),
            Err(e) => {
                tracing::error!(fsa = %key, error = %e, "municipality query failed");
                Err(ResolveError::Backend(e.to_string()))
            }
        }
    }

    fn backend_name(&self) -> &str {
        "sqlite"
    }
}
