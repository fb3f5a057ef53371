//! # pcl-cli: Command-Line Tool for Postal Code Lookup
//!
//! Provides the `pcl` command-line interface over [`pcl_core`] and the
//! storage adapters in [`pcl_api`].
//!
//! ## Subcommands
//!
//! - `pcl validate`: grammar check, optionally explaining derived facts.
//! - `pcl lookup`: full classification with municipality, as JSON.
//! - `pcl import`: load per-region JSON files into SQLite.
//! - `pcl regions`: print the region-code table.
//!
//! ```bash
//! pcl validate "K1A 0B1" b2c9z9 --explain
//! pcl lookup K1A0B1 --data-dir data/municipalities
//! pcl import --data-dir data/municipalities --database-url sqlite://municipalities.db
//! ```
//!
//! Every handler writes to a caller-supplied writer and returns the process
//! exit code: 0 on success, 1 when the input was rejected.

pub mod import;
pub mod lookup;
pub mod regions;
pub mod validate;
