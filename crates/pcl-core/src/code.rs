//! # Validated Code Newtypes
//!
//! [`NormalizedCode`] is the lowercase, space-free six-character form of a
//! postal code that passed the grammar check. [`Fsa`] is its first half.
//! Both validate at construction, including when deserialized.

use serde::{Deserialize, Serialize};

use crate::error::PostalCodeError;
use crate::validator::{self, is_valid_fsa_bytes};

/// Implement `Deserialize` for string newtypes by routing the raw string
/// through the type's validating constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A postal code that passed validation, stored as six lowercase
/// characters with no separator (`k1a0b1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedCode(String);

impl_validating_deserialize!(NormalizedCode);

impl NormalizedCode {
    /// Normalize `raw` (lowercase, drop whitespace) and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::InvalidFormat`] if the normalized string
    /// does not match the grammar.
    pub fn parse(raw: &str) -> Result<Self, PostalCodeError> {
        let normalized = validator::normalize(raw);
        if !validator::is_valid(&normalized) {
            return Err(PostalCodeError::InvalidFormat);
        }
        Ok(Self(normalized))
    }

    /// The six normalized characters.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Forward Sortation Area: the first three characters.
    pub fn fsa(&self) -> Fsa {
        Fsa(self.0[..3].to_string())
    }

    /// Local Delivery Unit: the last three characters.
    pub fn ldu(&self) -> &str {
        &self.0[3..]
    }

    /// The character at `index` of the normalized code.
    pub(crate) fn byte_at(&self, index: usize) -> u8 {
        self.0.as_bytes()[index]
    }
}

/// Canada Post presentation form: uppercase with a separating space.
impl std::fmt::Display for NormalizedCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.0[..3].to_ascii_uppercase(),
            self.0[3..].to_ascii_uppercase()
        )
    }
}

impl std::str::FromStr for NormalizedCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Forward Sortation Area, stored lowercase (`k1a`).
///
/// Municipality stores key on the uppercase form; use [`Fsa::as_upper`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fsa(String);

impl_validating_deserialize!(Fsa);

impl Fsa {
    /// Parse a standalone FSA such as `"K1A"`.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::InvalidFormat`] unless the input is
    /// exactly three characters matching the first half of the grammar.
    pub fn parse(raw: &str) -> Result<Self, PostalCodeError> {
        let normalized = validator::normalize(raw);
        if !is_valid_fsa_bytes(normalized.as_bytes()) {
            return Err(PostalCodeError::InvalidFormat);
        }
        Ok(Self(normalized))
    }

    /// Lowercase form (`k1a`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase key form (`K1A`).
    pub fn as_upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// The postal district letter that selects the province.
    pub fn district(&self) -> char {
        char::from(self.0.as_bytes()[0])
    }

    /// Rural FSAs carry a `0` in the second position.
    pub fn is_rural(&self) -> bool {
        self.0.as_bytes()[1] == b'0'
    }
}

impl std::fmt::Display for Fsa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_upper())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes() {
        let code = NormalizedCode::parse(" K1A 0B1").unwrap();
        assert_eq!(code.as_str(), "k1a0b1");
        assert_eq!(code.fsa().as_str(), "k1a");
        assert_eq!(code.ldu(), "0b1");
    }

    #[test]
    fn display_uses_presentation_form() {
        let code = NormalizedCode::parse("k1a0b1").unwrap();
        assert_eq!(code.to_string(), "K1A 0B1");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert_eq!(NormalizedCode::parse("K1A-0B1"), Err(PostalCodeError::InvalidFormat));
        assert_eq!(NormalizedCode::parse(""), Err(PostalCodeError::InvalidFormat));
    }

    #[test]
    fn from_str_matches_parse() {
        let code: NormalizedCode = "b2c9z9".parse().unwrap();
        assert_eq!(code, NormalizedCode::parse("B2C 9Z9").unwrap());
    }

    #[test]
    fn fsa_forms() {
        let fsa = Fsa::parse("x0a").unwrap();
        assert_eq!(fsa.as_str(), "x0a");
        assert_eq!(fsa.as_upper(), "X0A");
        assert_eq!(fsa.to_string(), "X0A");
        assert_eq!(fsa.district(), 'x');
        assert!(fsa.is_rural());
    }

    #[test]
    fn fsa_rejects_bad_input() {
        assert!(Fsa::parse("z1a").is_err());
        assert!(Fsa::parse("k1").is_err());
        assert!(Fsa::parse("k1a0").is_err());
        assert!(Fsa::parse("k1i").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<NormalizedCode, _> = serde_json::from_str("\"K1A 0B1\"");
        assert_eq!(ok.unwrap().as_str(), "k1a0b1");
        let bad: Result<NormalizedCode, _> = serde_json::from_str("\"K1A-0B1\"");
        assert!(bad.is_err());
        let fsa: Result<Fsa, _> = serde_json::from_str("\"Q1A\"");
        assert!(fsa.is_err());
    }
}
