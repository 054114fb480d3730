//! String comparison rules and length checks shared by generated key wrappers.
//!
//! Comparisons are ordinal (code point by code point), never locale aware.
//! The case-insensitive variant folds each character with its simple
//! uppercase mapping, so equality, ordering and hashing all agree.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::KeyLengthError;

/// Comparison rule of a key wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StringComparison {
    /// Exact code point comparison
    Ordinal,
    /// Code point comparison after simple uppercase folding
    OrdinalIgnoreCase,
}

impl StringComparison {
    /// Rule matching a case-sensitivity flag.
    pub const fn for_case(is_case_sensitive: bool) -> Self {
        if is_case_sensitive {
            Self::Ordinal
        } else {
            Self::OrdinalIgnoreCase
        }
    }

    pub const fn is_case_sensitive(self) -> bool {
        matches!(self, Self::Ordinal)
    }

    pub fn equals(self, left: &str, right: &str) -> bool {
        match self {
            Self::Ordinal => left == right,
            Self::OrdinalIgnoreCase => left.chars().map(fold).eq(right.chars().map(fold)),
        }
    }

    pub fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            Self::Ordinal => left.cmp(right),
            Self::OrdinalIgnoreCase => left.chars().map(fold).cmp(right.chars().map(fold)),
        }
    }

    /// Feeds `value` into `state` so that values equal under this rule hash
    /// identically.
    pub fn hash_str<H: Hasher>(self, value: &str, state: &mut H) {
        match self {
            Self::Ordinal => value.hash(state),
            Self::OrdinalIgnoreCase => {
                for c in value.chars().map(fold) {
                    state.write_u32(c as u32);
                }
                state.write_u8(0xff);
            }
        }
    }
}

/// Simple uppercase mapping; characters whose uppercase form expands to
/// several characters are kept as-is.
fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Checks `value` against a maximum length counted in characters.
pub fn check_length(
    type_name: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), KeyLengthError> {
    let actual = value.chars().count();
    if actual <= max_length {
        Ok(())
    } else {
        Err(KeyLengthError {
            type_name,
            max_length,
            actual,
        })
    }
}
