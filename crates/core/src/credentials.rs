//! Pluggable credential hashing and verification.
//!
//! Users carry a single stored credential string. What that string contains depends on the
//! [`CredentialVerifier`] the store was built with:
//!
//! - [`Argon2Credentials`] (default): an Argon2id PHC string, salted per user.
//! - [`PlaintextCredentials`]: the password itself, compared by equality. This exists only
//!   to open documents written by the legacy mock and for fast tests.

use crate::{BankError, BankResult};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Hashes new passwords and checks candidate passwords against stored credentials.
pub trait CredentialVerifier: Send + Sync + fmt::Debug {
    /// Produce the stored form of `password`.
    fn hash(&self, password: &str) -> BankResult<String>;

    /// Check `password` against a stored credential.
    ///
    /// Returns `Ok(false)` on mismatch, and `Err` only when `stored` is not in the format
    /// this verifier understands.
    fn verify(&self, password: &str, stored: &str) -> BankResult<bool>;
}

/// Argon2id hashing with configurable cost parameters.
#[derive(Clone, Debug, Default)]
pub struct Argon2Credentials {
    params: Params,
}

impl Argon2Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit cost parameters, e.g. cheap ones in tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialVerifier for Argon2Credentials {
    fn hash(&self, password: &str) -> BankResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| BankError::CredentialHash(e.to_string()))
    }

    fn verify(&self, password: &str, stored: &str) -> BankResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| BankError::MalformedCredential(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(BankError::MalformedCredential(e.to_string())),
        }
    }
}

/// Equality comparison against a plaintext stored credential.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextCredentials;

impl CredentialVerifier for PlaintextCredentials {
    fn hash(&self, password: &str) -> BankResult<String> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> BankResult<bool> {
        Ok(password == stored)
    }
}

/// Which verifier a store should be built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialScheme {
    #[default]
    Argon2,
    Plaintext,
}

impl CredentialScheme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argon2 => "argon2",
            Self::Plaintext => "plaintext",
        }
    }

    /// Build the verifier for this scheme with default parameters.
    pub fn verifier(self) -> Arc<dyn CredentialVerifier> {
        match self {
            Self::Argon2 => Arc::new(Argon2Credentials::new()),
            Self::Plaintext => Arc::new(PlaintextCredentials),
        }
    }
}

impl fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialScheme {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Self::Argon2),
            "plaintext" | "plain" => Ok(Self::Plaintext),
            other => Err(BankError::InvalidInput(format!(
                "unknown credential scheme: '{}'",
                other
            ))),
        }
    }
}
