//! # Error Types
//!
//! Classification errors are terminal for the call that produced them.
//! No partially populated [`PostalCode`](crate::PostalCode) is ever
//! returned alongside an error.

use thiserror::Error;

/// Failure of a single classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input does not match the postal code grammar. Never reaches
    /// the municipality lookup.
    #[error("invalid postal code")]
    InvalidFormat,

    /// The first character of the FSA has no entry in the region table.
    ///
    /// Unreachable while the grammar and the table agree, but the two are
    /// maintained separately.
    #[error("invalid fsa")]
    InvalidFsa,

    /// The municipality resolver failed. Carries the resolver's error
    /// verbatim.
    #[error(transparent)]
    MunicipalityLookupFailed(#[from] ResolveError),
}

/// Failure reported by an [`FsaResolver`](crate::FsaResolver) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The store has no municipality for this FSA.
    #[error("no municipality found for fsa {0}")]
    NotFound(String),

    /// The backing store could not be queried (I/O, connection, decode).
    #[error("municipality lookup failed: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_message() {
        assert_eq!(PostalCodeError::InvalidFormat.to_string(), "invalid postal code");
    }

    #[test]
    fn invalid_fsa_message() {
        assert_eq!(PostalCodeError::InvalidFsa.to_string(), "invalid fsa");
    }

    #[test]
    fn lookup_failure_is_transparent() {
        let err = PostalCodeError::from(ResolveError::NotFound("K1A".into()));
        assert_eq!(err.to_string(), "no municipality found for fsa K1A");
        assert!(matches!(
            err,
            PostalCodeError::MunicipalityLookupFailed(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn backend_error_keeps_message() {
        let err = ResolveError::Backend("database is locked".into());
        assert!(err.to_string().contains("database is locked"));
    }
}
