//! # Per-Region Municipality Files
//!
//! Alternative municipality backend reading one JSON object per region
//! from `<dir>/<REGION_CODE>.json` (e.g. `ON1.json`, `NU.json`), each
//! mapping an uppercase FSA to its municipality name:
//!
//! ```json
//! { "K1A": "Government of Canada Ottawa and Gatineau offices (partly in QC)" }
//! ```
//!
//! Files are loaded once at construction. A region with no file is treated
//! as empty, so every lookup in it is a miss rather than a startup error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use pcl_core::{Fsa, FsaResolver, RegionTable, ResolveError};

/// Errors while loading the region files.
#[derive(Debug, thiserror::Error)]
pub enum RegionalFileError {
    #[error("municipality data directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// [`FsaResolver`] over preloaded per-region JSON maps.
#[derive(Debug, Clone)]
pub struct RegionalFileResolver {
    regions: Arc<RegionTable>,
    /// Region code → (uppercase FSA → municipality).
    files: HashMap<&'static str, HashMap<String, String>>,
}

impl RegionalFileResolver {
    /// Load every region file present in `dir`.
    pub fn load(dir: impl AsRef<Path>, regions: Arc<RegionTable>) -> Result<Self, RegionalFileError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(RegionalFileError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut files = HashMap::new();
        for region in regions.regions() {
            let path = dir.join(format!("{}.json", region.code));
            if !path.is_file() {
                tracing::debug!(region = region.code, path = %path.display(), "no municipality file for region");
                continue;
            }

            let raw = std::fs::read_to_string(&path).map_err(|source| RegionalFileError::Io {
                path: path.clone(),
                source,
            })?;
            let entries: HashMap<String, String> =
                serde_json::from_str(&raw).map_err(|source| RegionalFileError::Parse {
                    path: path.clone(),
                    source,
                })?;

            let entries: HashMap<String, String> = entries
                .into_iter()
                .map(|(fsa, name)| (fsa.trim().to_ascii_uppercase(), name))
                .collect();
            tracing::debug!(region = region.code, entries = entries.len(), "loaded municipality file");
            files.insert(region.code, entries);
        }

        tracing::info!(
            dir = %dir.display(),
            regions = files.len(),
            "regional municipality files loaded"
        );
        Ok(Self { regions, files })
    }

    /// Total number of FSA entries across all loaded regions.
    pub fn len(&self) -> usize {
        self.files.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every `(FSA, municipality)` pair across all loaded regions.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .values()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

#[async_trait]
impl FsaResolver for RegionalFileResolver {
    async fn resolve(&self, fsa: &Fsa) -> Result<String, ResolveError> {
        let key = fsa.as_upper();
        let region = self
            .regions
            .lookup(fsa)
            .map_err(|_| ResolveError::NotFound(key.clone()))?;

        self.files
            .get(region.code)
            .and_then(|entries| entries.get(&key))
            .cloned()
            .ok_or(ResolveError::NotFound(key))
    }

    fn backend_name(&self) -> &str {
        "files"
    }
}
