//! Record identifier formats.
//!
//! Every collection in the blood bank document has a string `id`. Two formats are in use:
//!
//! - **Timestamp ids** for users, donors and donations: `<prefix>-<millis>` where `millis` is
//!   milliseconds since the Unix epoch, e.g. `donor-1760877600123`.
//! - **Request ids** for transfusion requests: `REQ-<year>-<seq>` where `seq` is the 1-based
//!   position of the request in its collection, zero-padded to three digits, e.g.
//!   `REQ-2026-007`.
//!
//! ## Uniqueness
//!
//! A wall-clock millisecond is not unique on its own: two records created in the same
//! millisecond would collide. [`TimestampId::generate`] takes the previous id for the same
//! prefix and guarantees the new millis value is strictly greater. Callers derive "previous"
//! from the ids already stored ([`TimestampId::latest`]), so the guarantee survives restarts.
//!
//! Seeded ids such as `donor-001` parse as timestamp ids with `millis == 1`, which keeps them
//! comparable with generated ones.

mod request;
mod timestamp;

pub use request::RequestId;
pub use timestamp::TimestampId;

/// Error type for identifier parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No id can follow the given one
    #[error("No id follows '{0}'")]
    Exhausted(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
