//! Transfusion requests and their status vocabulary.

use bloodbank_types::BloodType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request status.
///
/// The persisted field is a free-form string. Known values map to named variants; anything
/// else is preserved verbatim in [`RequestStatus::Other`] so a round trip never loses data.
///
/// Lifecycle: a request is created `pending` and may move out of `pending` exactly once,
/// at which point `processedAt`/`processedBy` are stamped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RequestStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// A transfusion request raised by a clinician.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    pub patient_name: String,
    pub patient_age: Option<u32>,
    pub blood_type: BloodType,
    /// Requested volume in millilitres.
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub surgery_type: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub doctor_name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub patient_name: String,
    #[serde(default)]
    pub patient_age: Option<u32>,
    pub blood_type: BloodType,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub surgery_type: String,
    #[serde(default)]
    pub notes: String,
}

impl NewRequest {
    pub fn new(patient_name: impl Into<String>, blood_type: BloodType, amount: u32) -> Self {
        Self {
            patient_name: patient_name.into(),
            patient_age: None,
            blood_type,
            amount,
            urgency: "normal".into(),
            diagnosis: String::new(),
            surgery_type: String::new(),
            notes: String::new(),
        }
    }
}
