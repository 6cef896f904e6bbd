use bloodbank_types::BloodType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A recorded donation.
///
/// `donor_name` and `blood_type` are a snapshot of the referenced donor taken when the
/// donation was recorded. `donor_id` is a weak reference: deleting or editing the donor later
/// does not touch existing donations. When the donor could not be resolved at record time
/// the snapshot holds `UNKNOWN_DONOR_NAME` and no blood type. A stored blood type that is
/// missing or not one of the eight groups also reads as no blood type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub donor_name: String,
    #[serde(default, deserialize_with = "blood_type_or_unknown")]
    pub blood_type: Option<BloodType>,
    /// Collected volume in millilitres.
    pub amount: u32,
    #[serde(default)]
    pub donation_type: String,
    #[serde(default)]
    pub health_status: String,
    #[serde(default)]
    pub notes: String,
    pub donation_date: DateTime<Utc>,
    pub recorded_by: String,
}

fn blood_type_or_unknown<'de, D>(deserializer: D) -> Result<Option<BloodType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    pub donor_id: String,
    pub amount: u32,
    #[serde(default)]
    pub donation_type: String,
    #[serde(default)]
    pub health_status: String,
    #[serde(default)]
    pub notes: String,
}

impl NewDonation {
    pub fn new(donor_id: impl Into<String>, amount: u32) -> Self {
        Self {
            donor_id: donor_id.into(),
            amount,
            donation_type: "whole".into(),
            health_status: "good".into(),
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation_json(blood_type: &str) -> String {
        format!(
            r#"{{"id": "donation-1", "donorId": "donor-x", "donorName": "Unknown donor",
                {blood_type}"amount": 200, "donationDate": "2024-06-15T00:00:00.000Z",
                "recordedBy": "user-001"}}"#
        )
    }

    #[test]
    fn test_unrecognised_blood_type_reads_as_unknown() {
        let donation: Donation = serde_json::from_str(&donation_json(r#""bloodType": "未知", "#))
            .expect("deserialize should succeed");
        assert_eq!(donation.blood_type, None);
        assert_eq!(donation.amount, 200);
    }

    #[test]
    fn test_missing_or_null_blood_type_reads_as_unknown() {
        let missing: Donation =
            serde_json::from_str(&donation_json("")).expect("deserialize should succeed");
        let null: Donation = serde_json::from_str(&donation_json(r#""bloodType": null, "#))
            .expect("deserialize should succeed");
        assert_eq!(missing.blood_type, None);
        assert_eq!(null.blood_type, None);
    }

    #[test]
    fn test_known_blood_type_survives_reload() {
        let donation: Donation = serde_json::from_str(&donation_json(r#""bloodType": "AB-", "#))
            .expect("deserialize should succeed");
        assert_eq!(donation.blood_type, Some(BloodType::AbNegative));

        let rendered = serde_json::to_string(&donation).expect("serialize should succeed");
        let reloaded: Donation = serde_json::from_str(&rendered).expect("deserialize should succeed");
        assert_eq!(reloaded, donation);
    }
}
