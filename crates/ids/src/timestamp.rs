use crate::{IdError, IdResult};
use chrono::Utc;
use std::{fmt, str::FromStr};

/// A `<prefix>-<millis>` identifier.
///
/// # Monotonicity Guarantee
///
/// When calling [`TimestampId::generate`] with the previous id for the same prefix, the
/// millis component is guaranteed to be strictly greater than the previous one (incremented
/// by 1 if the clock has not advanced). Within one collection this makes generated ids
/// unique and ordered by creation. A previous id already at `i64::MAX` leaves no successor
/// and is reported as [`IdError::Exhausted`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimestampId {
    prefix: String,
    millis: i64,
}

impl TimestampId {
    /// Generates a new id for `prefix`.
    ///
    /// If `last` is provided and shares the prefix, the new millis value is strictly
    /// greater than `last.millis()`. A `last` with a different prefix is ignored.
    ///
    /// Designed to be called while holding the store's write lock.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] if `last.millis()` is `i64::MAX`.
    pub fn generate(prefix: &str, last: Option<&TimestampId>) -> IdResult<Self> {
        let now = Utc::now().timestamp_millis();

        let millis = match last {
            Some(prev) if prev.prefix == prefix && now <= prev.millis => prev
                .millis
                .checked_add(1)
                .ok_or_else(|| IdError::Exhausted(prev.to_string()))?,
            _ => now,
        };

        Ok(Self {
            prefix: prefix.to_string(),
            millis,
        })
    }

    /// Returns the id with the greatest millis value among `ids` that carry `prefix`.
    ///
    /// Ids that do not parse, or that belong to another prefix, are skipped.
    pub fn latest<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        ids.into_iter()
            .filter_map(|raw| raw.parse::<TimestampId>().ok())
            .filter(|id| id.prefix == prefix)
            .max_by_key(|id| id.millis)
    }

    /// Generates the next id for `prefix` given every id already stored in the collection.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] if the stored ids leave no greater millis value.
    pub fn next_after<'a>(
        prefix: &str,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> IdResult<Self> {
        let last = Self::latest(prefix, ids);
        Self::generate(prefix, last.as_ref())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }
}

impl fmt::Display for TimestampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.millis)
    }
}

impl FromStr for TimestampId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, millis_str) = s.rsplit_once('-').ok_or_else(|| {
            IdError::InvalidInput(format!("Invalid timestamp id format: '{}'", s))
        })?;

        if prefix.is_empty() {
            return Err(IdError::InvalidInput(format!(
                "Timestamp id prefix cannot be empty: '{}'",
                s
            )));
        }

        if millis_str.is_empty() || !millis_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::InvalidInput(format!(
                "Timestamp id suffix must be decimal digits: '{}'",
                s
            )));
        }

        let millis = millis_str.parse::<i64>().map_err(|e| {
            IdError::InvalidInput(format!("Timestamp id suffix out of range '{}': {}", s, e))
        })?;

        Ok(Self {
            prefix: prefix.to_string(),
            millis,
        })
    }
}
