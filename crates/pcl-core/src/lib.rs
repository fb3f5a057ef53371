//! # pcl-core: Canadian Postal Code Classification
//!
//! The domain core of the postal code lookup service. Parses a raw postal
//! code, checks it against the Canada Post grammar, and derives the facts
//! encoded in its characters: province, subdivision, urban/rural delivery,
//! and the special-purpose ranges (government buildings, business reply,
//! regional distribution centres, post offices).
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** [`NormalizedCode`] and [`Fsa`] can only be
//!    constructed through the grammar check. Downstream code never slices
//!    an unvalidated string.
//!
//! 2. **Static region table, injected.** [`RegionTable`] is built once and
//!    shared behind an `Arc`. The classifier never rebuilds it per call.
//!
//! 3. **Pluggable municipality lookup.** The only I/O in a classification
//!    goes through the [`FsaResolver`] trait. Storage choice (SQLite,
//!    per-region JSON files, in-memory map) is the caller's concern.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pcl-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod classifier;
pub mod code;
pub mod error;
pub mod region;
pub mod resolver;
pub mod validator;

// Re-export primary types for ergonomic imports.
pub use classifier::{Classifier, CodeFacts, PostalCode};
pub use code::{Fsa, NormalizedCode};
pub use error::{PostalCodeError, ResolveError};
pub use region::{Province, Region, RegionTable};
pub use resolver::{FsaResolver, StaticResolver};
pub use validator::{is_valid, normalize};
