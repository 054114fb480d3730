use thiserror::Error;

/// Raised when a key wrapper is built or assigned with a value longer than
/// its maximum length. Values are never truncated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{type_name} length cannot exceed {max_length} (got {actual})")]
pub struct KeyLengthError {
    /// Name of the key wrapper that rejected the value
    pub type_name: &'static str,
    /// Maximum length in characters
    pub max_length: usize,
    /// Length of the rejected value in characters
    pub actual: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_type_and_limit() {
        let err = KeyLengthError {
            type_name: "NameString",
            max_length: 64,
            actual: 65,
        };
        assert_eq!(
            err.to_string(),
            "NameString length cannot exceed 64 (got 65)"
        );
    }
}
