//! # API Route Modules
//!
//! - `postal_code`: full classification with municipality lookup.
//! - `validity`: grammar check only, no lookup.
//! - `regions`: the static region-code table.

pub mod postal_code;
pub mod regions;
pub mod validity;
