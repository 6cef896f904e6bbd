use crate::models::Role;

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write document file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read document file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),

    #[error("failed to hash credential: {0}")]
    CredentialHash(String),
    #[error("stored credential is malformed: {0}")]
    MalformedCredential(String),

    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username already exists: {0}")]
    UsernameExists(String),
    #[error("account role mismatch: expected {expected}, found {actual}")]
    RoleMismatch { expected: Role, actual: Role },

    #[error("invalid text: {0}")]
    Text(#[from] bloodbank_types::TypesError),
    #[error("invalid identifier: {0}")]
    Id(#[from] bloodbank_ids::IdError),
}

pub type BankResult<T> = std::result::Result<T, BankError>;
