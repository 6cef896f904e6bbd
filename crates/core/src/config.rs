//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services as an `Arc<CoreConfig>`. The core never reads process-wide
//! environment variables itself; binaries read them and hand the raw values to the
//! `*_from_env_value` helpers below.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY, DOCUMENT_FILE_EXTENSION};
use crate::credentials::CredentialScheme;
use crate::validation::validate_storage_key;
use crate::BankResult;
use bloodbank_types::NonEmptyText;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    storage_key: NonEmptyText,
    credential_scheme: CredentialScheme,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidInput` if `storage_key` is not safe to use as a file stem.
    pub fn new(
        data_dir: PathBuf,
        storage_key: NonEmptyText,
        credential_scheme: CredentialScheme,
    ) -> BankResult<Self> {
        validate_storage_key(storage_key.as_str())?;

        Ok(Self {
            data_dir,
            storage_key,
            credential_scheme,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_str()
    }

    pub fn credential_scheme(&self) -> CredentialScheme {
        self.credential_scheme
    }

    /// Path of the persisted document when using the file backend.
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(format!(
            "{}.{}",
            self.storage_key, DOCUMENT_FILE_EXTENSION
        ))
    }
}

/// Resolve the data directory from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Parse the storage key from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_STORAGE_KEY`].
///
/// # Errors
///
/// Returns `BankError::InvalidInput` if the key contains unsafe characters.
pub fn storage_key_from_env_value(value: Option<String>) -> BankResult<NonEmptyText> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    validate_storage_key(&value)?;
    Ok(NonEmptyText::new(value)?)
}

/// Parse the credential scheme from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns [`CredentialScheme::Argon2`].
///
/// # Errors
///
/// Returns `BankError::InvalidInput` for an unrecognised scheme name.
pub fn credential_scheme_from_env_value(value: Option<String>) -> BankResult<CredentialScheme> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<CredentialScheme>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
