//! # Lookup Subcommand
//!
//! Full classification of one postal code, municipality included, printed
//! as the same JSON document the HTTP API returns.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use pcl_api::db;
use pcl_api::db::municipalities::SqlResolver;
use pcl_api::regional_files::RegionalFileResolver;
use pcl_api::state::DEFAULT_DATABASE_URL;
use pcl_core::{Classifier, FsaResolver, PostalCodeError, RegionTable, ResolveError};

/// Arguments for the `pcl lookup` subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Postal code to classify.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Read municipalities from per-region JSON files in this directory.
    /// Takes precedence over --database-url.
    #[arg(long, env = "MUNICIPALITY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read municipalities from this existing SQLite database (see `pcl import`).
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Execute the lookup subcommand.
///
/// Returns exit code: 0 on success, 1 if the code is invalid or has no
/// municipality. Backend failures are returned as errors.
pub async fn run_lookup<W: Write>(args: &LookupArgs, out: &mut W) -> Result<u8> {
    let regions = Arc::new(RegionTable::canadian());
    let classifier = Classifier::new(Arc::clone(&regions));

    let resolver: Box<dyn FsaResolver> = match &args.data_dir {
        Some(dir) => Box::new(
            RegionalFileResolver::load(dir, regions)
                .with_context(|| format!("failed to load municipality files from {}", dir.display()))?,
        ),
        None => {
            let pool = db::open_existing(&args.database_url)
                .await
                .with_context(|| format!("failed to open {}", args.database_url))?;
            Box::new(SqlResolver::new(pool))
        }
    };
    tracing::info!(backend = resolver.backend_name(), "municipality backend ready");

    match classifier.classify(&args.code, resolver.as_ref()).await {
        Ok(postal_code) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&postal_code)?)?;
            Ok(0)
        }
        Err(PostalCodeError::MunicipalityLookupFailed(ResolveError::Backend(msg))) => {
            bail!("municipality lookup failed: {msg}")
        }
        Err(e) => {
            writeln!(out, "error: {e}")?;
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(code: &str, data_dir: Option<PathBuf>, database_url: String) -> LookupArgs {
        LookupArgs {
            code: code.to_string(),
            data_dir,
            database_url,
        }
    }

    async fn run(args: &LookupArgs) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_lookup(args, &mut out).await.unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn looks_up_from_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("NS.json"), r#"{"B2C":"Iona"}"#).unwrap();

        let (code, out) = run(&args("B2C 9Z9", Some(dir.path().into()), String::new())).await;
        assert_eq!(code, 0);

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["municipality"], "Iona");
        assert_eq!(json["province"], "Nova Scotia");
        assert_eq!(json["businessReply"], true);
    }

    #[tokio::test]
    async fn looks_up_from_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("m.db").display());
        let pool = db::init_pool(&url).await.unwrap();
        db::municipalities::upsert(&pool, "G1X", "Quebec City West Sainte-Foy")
            .await
            .unwrap();
        pool.close().await;

        let (code, out) = run(&args("g1x2z0", None, url)).await;
        assert_eq!(code, 0);
        assert!(out.contains("Sainte-Foy"));
        assert!(out.contains("\"postOffice\": true"));
    }

    #[tokio::test]
    async fn invalid_code_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(&args("K1A-0B1", Some(dir.path().into()), String::new())).await;
        assert_eq!(code, 1);
        assert_eq!(out.trim(), "error: invalid postal code");
    }

    #[tokio::test]
    async fn unknown_fsa_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(&args("K1A0B1", Some(dir.path().into()), String::new())).await;
        assert_eq!(code, 1);
        assert!(out.contains("no municipality found for fsa K1A"));
    }

    #[tokio::test]
    async fn missing_data_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = args("K1A0B1", Some(dir.path().join("absent")), String::new());
        let mut out = Vec::new();
        assert!(run_lookup(&lookup, &mut out).await.is_err());
    }

    #[tokio::test]
    async fn missing_database_is_an_error_and_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let lookup = args("K1A0B1", None, format!("sqlite://{}", path.display()));
        let mut out = Vec::new();
        assert!(run_lookup(&lookup, &mut out).await.is_err());
        assert!(!path.exists());
    }
}
