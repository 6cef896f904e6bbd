use bloodbank_types::BloodType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorStatus {
    #[default]
    Active,
    Inactive,
    Deferred,
}

/// A registered blood donor, owned by the user who created it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub blood_type: BloodType,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub id_card: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: DonorStatus,
    pub last_donation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_donations: u32,
    #[serde(default)]
    pub notes: String,
    pub created_by: String,
    /// Absent on donors registered before creation times were stamped; those read as the
    /// Unix epoch.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Donor {
    pub fn is_active(&self) -> bool {
        self.status == DonorStatus::Active
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonor {
    pub name: String,
    pub blood_type: BloodType,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub id_card: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: DonorStatus,
    #[serde(default)]
    pub notes: String,
}

impl NewDonor {
    pub fn new(name: impl Into<String>, blood_type: BloodType) -> Self {
        Self {
            name: name.into(),
            blood_type,
            phone: String::new(),
            id_card: String::new(),
            address: String::new(),
            status: DonorStatus::Active,
            notes: String::new(),
        }
    }
}
