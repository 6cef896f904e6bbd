use crate::{IdError, IdResult};
use chrono::{Datelike, Utc};
use std::{fmt, str::FromStr};

const REQUEST_PREFIX: &str = "REQ";

/// Transfusion request identifier: `REQ-<year>-<seq>`.
///
/// `seq` is the 1-based position of the request in the collection at the time it was
/// created, zero-padded to three digits. Values above 999 render with as many digits as
/// needed (`REQ-2026-1000`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId {
    year: i32,
    seq: u32,
}

impl RequestId {
    /// Creates a request id from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `seq` is zero.
    pub fn new(year: i32, seq: u32) -> IdResult<Self> {
        if seq == 0 {
            return Err(IdError::InvalidInput(
                "request sequence must start at 1".into(),
            ));
        }
        Ok(Self { year, seq })
    }

    /// Next request id for a collection that currently holds `existing_count` requests,
    /// stamped with `year`.
    pub fn next_for_year(year: i32, existing_count: usize) -> Self {
        let seq = u32::try_from(existing_count)
            .unwrap_or(u32::MAX - 1)
            .saturating_add(1);
        Self { year, seq }
    }

    /// Next request id stamped with the current UTC year.
    pub fn next(existing_count: usize) -> Self {
        Self::next_for_year(Utc::now().year(), existing_count)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:03}", REQUEST_PREFIX, self.year, self.seq)
    }
}

impl FromStr for RequestId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let (prefix, year, seq) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(y), Some(q)) => (p, y, q),
            _ => {
                return Err(IdError::InvalidInput(format!(
                    "Invalid request id format: '{}'",
                    s
                )))
            }
        };

        if prefix != REQUEST_PREFIX {
            return Err(IdError::InvalidInput(format!(
                "Request id must start with '{}-': '{}'",
                REQUEST_PREFIX, s
            )));
        }

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year) || !digits(seq) || seq.len() < 3 {
            return Err(IdError::InvalidInput(format!(
                "Invalid request id format: '{}'",
                s
            )));
        }

        let year = year
            .parse::<i32>()
            .map_err(|e| IdError::InvalidInput(format!("Invalid request year '{}': {}", s, e)))?;
        let seq = seq
            .parse::<u32>()
            .map_err(|e| IdError::InvalidInput(format!("Invalid request sequence '{}': {}", s, e)))?;

        Self::new(year, seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads_to_three_digits() {
        let id = RequestId::new(2024, 1).expect("new should succeed");
        assert_eq!(id.to_string(), "REQ-2024-001");

        let id = RequestId::new(2026, 42).expect("new should succeed");
        assert_eq!(id.to_string(), "REQ-2026-042");
    }

    #[test]
    fn test_display_wide_sequence() {
        let id = RequestId::new(2026, 1000).expect("new should succeed");
        assert_eq!(id.to_string(), "REQ-2026-1000");
    }

    #[test]
    fn test_next_for_year_is_count_plus_one() {
        assert_eq!(RequestId::next_for_year(2026, 0).to_string(), "REQ-2026-001");
        assert_eq!(RequestId::next_for_year(2026, 9).to_string(), "REQ-2026-010");
    }

    #[test]
    fn test_next_uses_current_year() {
        let id = RequestId::next(3);
        assert_eq!(id.year(), Utc::now().year());
        assert_eq!(id.seq(), 4);
    }

    #[test]
    fn test_new_rejects_zero_sequence() {
        assert!(RequestId::new(2026, 0).is_err());
    }

    #[test]
    fn test_parse_valid() {
        let id: RequestId = "REQ-2024-001".parse().expect("parse should succeed");
        assert_eq!(id.year(), 2024);
        assert_eq!(id.seq(), 1);
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        match "ORD-2024-001".parse::<RequestId>() {
            Err(IdError::InvalidInput(msg)) => assert!(msg.contains("must start with")),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_unpadded_sequence() {
        assert!("REQ-2024-1".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!("REQ-2024".parse::<RequestId>().is_err());
        assert!("REQ".parse::<RequestId>().is_err());
        assert!("".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_ordering_by_year_then_sequence() {
        let a = RequestId::new(2024, 7).expect("new should succeed");
        let b = RequestId::new(2025, 1).expect("new should succeed");
        let c = RequestId::new(2025, 2).expect("new should succeed");
        assert!(a < b && b < c);
    }
}
