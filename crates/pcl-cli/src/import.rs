//! # Import Subcommand
//!
//! Loads every `<REGION_CODE>.json` file from a directory and upserts the
//! entries into the SQLite `municipalities` table used by the API's
//! `sqlite` backend. Re-running an import is safe: existing FSAs are
//! overwritten.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use pcl_api::db;
use pcl_api::regional_files::RegionalFileResolver;
use pcl_api::state::DEFAULT_DATABASE_URL;
use pcl_core::RegionTable;

/// Arguments for the `pcl import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Directory containing per-region JSON files (ON1.json, NS.json, ...).
    #[arg(long, env = "MUNICIPALITY_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Target SQLite database. Created if it does not exist.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Execute the import subcommand.
///
/// Returns exit code: 0 on success, 1 if the directory held no entries.
pub async fn run_import<W: Write>(args: &ImportArgs, out: &mut W) -> Result<u8> {
    let regions = Arc::new(RegionTable::canadian());
    let files = RegionalFileResolver::load(&args.data_dir, regions).with_context(|| {
        format!(
            "failed to load municipality files from {}",
            args.data_dir.display()
        )
    })?;

    if files.is_empty() {
        writeln!(
            out,
            "No municipality entries found in {}",
            args.data_dir.display()
        )?;
        return Ok(1);
    }

    let pool = db::init_pool(&args.database_url)
        .await
        .with_context(|| format!("failed to open {}", args.database_url))?;

    let written = db::municipalities::upsert_all(&pool, files.entries())
        .await
        .context("failed to write municipalities")?;
    let total = db::municipalities::count(&pool).await?;
    pool.close().await;

    tracing::info!(written, total, "import complete");
    writeln!(
        out,
        "Imported {written} municipalities ({total} rows in database)."
    )?;
    Ok(0)
}
