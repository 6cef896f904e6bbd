use bloodbank_types::BloodType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock level for one blood type. The document holds at most one record per type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: String,
    pub blood_type: BloodType,
    pub amount: u64,
    pub capacity: u64,
    #[serde(default)]
    pub unit: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub status: String,
}

impl InventoryRecord {
    /// Apply a signed change to `amount`, clamping at zero.
    ///
    /// Returns the new amount.
    pub fn adjust(&mut self, delta: i64, now: DateTime<Utc>) -> u64 {
        let current = i128::from(self.amount);
        let next = (current + i128::from(delta)).clamp(0, i128::from(u64::MAX));
        self.amount = u64::try_from(next).unwrap_or(u64::MAX);
        self.last_updated = now;
        self.amount
    }
}
