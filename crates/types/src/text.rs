use crate::TypesError;
use std::fmt;

/// Trimmed text with at least one visible character.
///
/// Used for the fields a record cannot be created without (a donor's name, an account's
/// username) and for the document storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and keeps it if anything is left.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::Empty`] for empty or whitespace-only input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        match input.as_ref().trim() {
            "" => Err(TypesError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
