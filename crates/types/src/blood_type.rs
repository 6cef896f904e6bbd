use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// ABO/Rh blood group.
///
/// Serialised using the clinical notation (`"A+"`, `"O-"`, ...), which is also the
/// format stored in the persisted document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// All eight groups in display order.
    pub const ALL: [BloodType; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = TypesError;

    /// Parses the clinical notation. Surrounding whitespace is ignored and the
    /// group letters are case-insensitive (`"ab+"` parses as `AB+`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|bt| bt.as_str() == normalised)
            .ok_or_else(|| TypesError::UnknownBloodType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_every_group() {
        for bt in BloodType::ALL {
            let parsed: BloodType = bt.as_str().parse().expect("parse should succeed");
            assert_eq!(parsed, bt);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("ab-".parse::<BloodType>(), Ok(BloodType::AbNegative));
        assert_eq!(" o+ ".parse::<BloodType>(), Ok(BloodType::OPositive));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!(
            "C+".parse::<BloodType>(),
            Err(TypesError::UnknownBloodType("C+".into()))
        );
    }

    #[test]
    fn test_serde_uses_clinical_notation() {
        let json = serde_json::to_string(&BloodType::AbPositive).expect("serialize should succeed");
        assert_eq!(json, "\"AB+\"");

        let parsed: BloodType = serde_json::from_str("\"O-\"").expect("deserialize should succeed");
        assert_eq!(parsed, BloodType::ONegative);
    }
}
