//! Input validation utilities.
//!
//! This module contains functions for validating user inputs to ensure they meet
//! safety and correctness requirements before being used in operations.

use crate::{BankError, BankResult};

/// Validates that a storage key is safe to use as a file stem.
///
/// The file backend persists the document at `<data_dir>/<key>.json`, so the key must not
/// be able to escape the data directory or produce a hidden file:
/// - Rejects empty or whitespace-only strings
/// - Bounds the length to avoid pathological inputs
/// - Restricts characters to ASCII alphanumerics plus `.`, `-` and `_`
/// - Rejects a leading `.`
///
/// # Errors
///
/// Returns a `BankError::InvalidInput` if the key is invalid.
pub fn validate_storage_key(key: &str) -> BankResult<()> {
    const MAX_KEY_LEN: usize = 128;

    if key.trim().is_empty() {
        return Err(BankError::InvalidInput("storage key cannot be empty".into()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(BankError::InvalidInput(format!(
            "storage key exceeds maximum length of {} characters",
            MAX_KEY_LEN
        )));
    }

    if !key.is_ascii() {
        return Err(BankError::InvalidInput(
            "storage key must contain only ASCII characters".into(),
        ));
    }

    let ok = key
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(BankError::InvalidInput(
            "storage key contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    if key.starts_with('.') {
        return Err(BankError::InvalidInput(
            "storage key cannot start with '.'".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_key() {
        assert!(validate_storage_key("blood_bank").is_ok());
        assert!(validate_storage_key("mockDatabase-v1.2").is_ok());
    }

    #[test]
    fn test_rejects_path_traversal() {
        assert!(validate_storage_key("../etc/passwd").is_err());
        assert!(validate_storage_key("a/b").is_err());
        assert!(validate_storage_key("..").is_err());
    }

    #[test]
    fn test_rejects_hidden_and_empty() {
        assert!(validate_storage_key(".hidden").is_err());
        assert!(validate_storage_key("   ").is_err());
    }

    #[test]
    fn test_rejects_overlong_and_non_ascii() {
        assert!(validate_storage_key(&"k".repeat(129)).is_err());
        assert!(validate_storage_key("血库").is_err());
    }
}
