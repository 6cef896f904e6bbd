//! # Blood Bank Types
//!
//! Small validated value types shared across the blood bank crates:
//! - [`NonEmptyText`] for names, usernames and storage keys that must carry content
//! - [`BloodType`], the closed ABO/Rh vocabulary used by donors, requests and inventory

mod blood_type;
mod text;

pub use blood_type::BloodType;
pub use text::NonEmptyText;

/// Errors that can occur when constructing validated types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The input was not one of the eight ABO/Rh blood groups
    #[error("Unknown blood type: '{0}'")]
    UnknownBloodType(String),
}
