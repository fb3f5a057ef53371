//! # Municipality Resolver
//!
//! The classifier's only collaborator. A resolver maps an uppercase FSA
//! to the municipality it serves. Backends own their own storage, retry,
//! and cancellation behaviour; the classifier calls [`FsaResolver::resolve`]
//! exactly once per classification and propagates any error unchanged.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::code::Fsa;
use crate::error::ResolveError;

/// Read-only FSA → municipality lookup.
///
/// Implementations must be `Send + Sync` so one instance can serve
/// concurrent requests behind an `Arc`. The trait is object-safe so the
/// backend can be chosen at runtime.
#[async_trait]
pub trait FsaResolver: Send + Sync {
    /// Municipality name for `fsa`.
    ///
    /// Implementations key their stores on [`Fsa::as_upper`].
    async fn resolve(&self, fsa: &Fsa) -> Result<String, ResolveError>;

    /// Human-readable backend name for logs and readiness output.
    fn backend_name(&self) -> &str;
}

/// In-memory resolver over a fixed map.
///
/// Keys are normalized to uppercase on insertion.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the municipality for `fsa`.
    pub fn with_entry(mut self, fsa: &str, municipality: impl Into<String>) -> Self {
        self.insert(fsa, municipality);
        self
    }

    pub fn insert(&mut self, fsa: &str, municipality: impl Into<String>) {
        self.entries
            .insert(fsa.trim().to_ascii_uppercase(), municipality.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticResolver
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for (fsa, municipality) in iter {
            resolver.insert(fsa.as_ref(), municipality);
        }
        resolver
    }
}

#[async_trait]
impl FsaResolver for StaticResolver {
    async fn resolve(&self, fsa: &Fsa) -> Result<String, ResolveError> {
        let key = fsa.as_upper();
        self.entries
            .get(&key)
            .cloned()
            .ok_or(ResolveError::NotFound(key))
    }

    fn backend_name(&self) -> &str {
        "static"
    }
}
