//! # Postal Code Grammar
//!
//! Canada Post codes have the shape `ANA NAN`. The letters are drawn from
//! restricted alphabets that avoid characters easily confused with digits
//! or each other in handwriting and OCR:
//!
//! | Position | Allowed |
//! |----------|---------|
//! | 1 | `a b c e g h j k l m n p r s t v x y` |
//! | 2, 4, 6 | `0-9` |
//! | 3 | `a b c d e f g h j k l m n p r s t v x y z` |
//! | 5 | `a b c e g h j k l m n p r s t v w x y z` |
//!
//! A single space may separate positions 3 and 4. The match is anchored at
//! both ends: anything after the sixth significant character is rejected.

/// Letters allowed in the first position (the postal district).
pub(crate) const DISTRICT_LETTERS: &[u8] = b"abceghjklmnprstvxy";

/// Letters allowed in the third position.
pub(crate) const FSA_TAIL_LETTERS: &[u8] = b"abcdefghjklmnprstvxyz";

/// Letters allowed in the fifth position.
pub(crate) const LDU_LETTERS: &[u8] = b"abceghjklmnprstvwxyz";

/// Lowercase `raw` and drop every whitespace character.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Check a lowercased code against the postal code grammar.
///
/// Accepts `k1a0b1` and `k1a 0b1`. Uppercase input must be lowercased by
/// the caller (see [`normalize`]); the grammar itself is case-sensitive.
pub fn is_valid(code: &str) -> bool {
    let bytes = code.as_bytes();
    let (fsa, ldu) = match bytes.len() {
        6 => (&bytes[..3], &bytes[3..]),
        7 if bytes[3] == b' ' => (&bytes[..3], &bytes[4..]),
        _ => return false,
    };
    is_valid_fsa_bytes(fsa) && is_valid_ldu_bytes(ldu)
}

/// Check three lowercase bytes against the FSA half of the grammar.
pub(crate) fn is_valid_fsa_bytes(fsa: &[u8]) -> bool {
    matches!(fsa, [district, digit, tail]
        if DISTRICT_LETTERS.contains(district)
            && digit.is_ascii_digit()
            && FSA_TAIL_LETTERS.contains(tail))
}

/// Check three lowercase bytes against the LDU half of the grammar.
fn is_valid_ldu_bytes(ldu: &[u8]) -> bool {
    matches!(ldu, [d1, letter, d2]
        if d1.is_ascii_digit() && LDU_LETTERS.contains(letter) && d2.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str) -> bool {
        is_valid(&raw.to_lowercase())
    }

    #[test]
    fn accepts_well_formed_codes() {
        assert!(check("K1A 0B1"));
        assert!(check("K1A0B1"));
        assert!(check("A1A1A1"));
        assert!(check("X0X 0X0"));
        assert!(check("B2C 9Z9"));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(!check("Z9Z 9Z9")); // Z cannot open a code
        assert!(!check("123 456"));
        assert!(!check("K1A-0B1"));
        assert!(!check("A1A-1A1"));
        assert!(!check("A1A A1A"));
        assert!(!check("A1 1A1"));
        assert!(!check("foobaff"));
        assert!(!check(""));
    }

    #[test]
    fn rejects_trailing_characters() {
        assert!(!check("K1A0B1X"));
        assert!(!check("K1A 0B12"));
    }

    #[test]
    fn rejects_more_than_one_separator_space() {
        assert!(!check("K1A  0B1"));
        assert!(!check(" K1A0B1"));
    }

    #[test]
    fn third_position_allows_d_f_z() {
        assert!(check("A1D 1A1"));
        assert!(check("A1F 1A1"));
        assert!(check("A1Z 1A1"));
        assert!(!check("A1I 1A1"));
        assert!(!check("A1O 1A1"));
    }

    #[test]
    fn fifth_position_allows_w_z_but_not_d() {
        assert!(check("A1A 1W1"));
        assert!(check("A1A 1Z1"));
        assert!(!check("A1A 1D1"));
        assert!(!check("A1A 1U1"));
    }

    #[test]
    fn grammar_is_case_sensitive() {
        assert!(!is_valid("K1A0B1"));
    }

    #[test]
    fn normalize_strips_all_whitespace() {
        assert_eq!(normalize(" K1A 0B1 "), "k1a0b1");
        assert_eq!(normalize("k1a\t0b1"), "k1a0b1");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn non_ascii_input_rejected() {
        assert!(!check("K1A 0B1é"));
        assert!(!check("ķ1a0b1"));
    }
}
