//! Doctor-facing overview.
//!
//! The data model has no doctor-patient relation, so this view is a display-only synthesis
//! over the global pools: the first donors stand in for patients and receive conditions by
//! cycling through [`PatientCondition::CYCLE`], and the first requests receive cycling
//! urgency labels. Nothing here should be read as clinical state.

use crate::constants::{
    DOCTOR_PATIENT_POOL, DOCTOR_REQUEST_POOL, DOCTOR_TRANSFUSION_WINDOW_DAYS, RECENT_LIMIT,
};
use crate::document::Document;
use crate::models::Request;
use bloodbank_types::BloodType;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientCondition {
    Stable,
    Recovering,
    Observation,
    Critical,
}

impl PatientCondition {
    pub const CYCLE: [PatientCondition; 4] = [
        Self::Stable,
        Self::Recovering,
        Self::Observation,
        Self::Critical,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Recovering => "Recovering",
            Self::Observation => "Under observation",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLabel {
    Routine,
    Urgent,
    VeryUrgent,
}

impl UrgencyLabel {
    pub const CYCLE: [UrgencyLabel; 3] = [Self::Routine, Self::Urgent, Self::VeryUrgent];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Urgent => "urgent",
            Self::VeryUrgent => "very urgent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPatient {
    pub id: String,
    pub name: String,
    pub blood_type: BloodType,
    /// Display label for `status`.
    pub condition: &'static str,
    pub last_transfusion: Option<DateTime<Utc>>,
    pub status: PatientCondition,
    pub assigned_doctor: Option<String>,
}

/// A request with its urgency replaced by the cycling display label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRequest {
    #[serde(flatten)]
    pub request: Request,
    pub requested_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStats {
    pub total_patients: usize,
    pub pending_requests: usize,
    /// Placeholder between 1 and 5.
    pub today_transfusions: u32,
    pub critical_alerts: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDashboard {
    pub stats: DoctorStats,
    pub recent_patients: Vec<DoctorPatient>,
    pub recent_requests: Vec<DoctorRequest>,
}

impl DoctorDashboard {
    /// Synthesises the view for `current_doctor`.
    ///
    /// Patients and requests are taken from the head of each collection, unlike the admin
    /// and user views which take the most recent tail.
    ///
    /// `rng` drives the placeholder transfusion timestamps and today's count; pass a seeded
    /// generator for reproducible output.
    pub fn from_document<R: Rng>(
        doc: &Document,
        current_doctor: Option<&str>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let window_ms = Duration::days(DOCTOR_TRANSFUSION_WINDOW_DAYS).num_milliseconds();
        let assigned = current_doctor.map(str::to_string);

        let patients: Vec<DoctorPatient> = doc
            .donors
            .iter()
            .take(DOCTOR_PATIENT_POOL)
            .enumerate()
            .map(|(index, donor)| {
                let status = PatientCondition::CYCLE[index % PatientCondition::CYCLE.len()];
                let last_transfusion = (index % 3 == 0)
                    .then(|| now - Duration::milliseconds(rng.gen_range(0..window_ms)));
                DoctorPatient {
                    id: donor.id.clone(),
                    name: donor.name.clone(),
                    blood_type: donor.blood_type,
                    condition: status.label(),
                    last_transfusion,
                    status,
                    assigned_doctor: assigned.clone(),
                }
            })
            .collect();

        let requests: Vec<DoctorRequest> = doc
            .requests
            .iter()
            .take(DOCTOR_REQUEST_POOL)
            .enumerate()
            .map(|(index, request)| {
                let mut request = request.clone();
                request.urgency = UrgencyLabel::CYCLE[index % UrgencyLabel::CYCLE.len()]
                    .as_str()
                    .to_string();
                DoctorRequest {
                    request,
                    requested_by: assigned.clone(),
                }
            })
            .collect();

        let stats = DoctorStats {
            total_patients: patients.len(),
            pending_requests: requests
                .iter()
                .filter(|r| r.request.status.is_pending())
                .count(),
            today_transfusions: rng.gen_range(1..=5),
            critical_alerts: patients
                .iter()
                .filter(|p| p.status == PatientCondition::Critical)
                .count(),
        };

        Self {
            stats,
            recent_patients: patients.into_iter().take(RECENT_LIMIT).collect(),
            recent_requests: requests.into_iter().take(RECENT_LIMIT).collect(),
        }
    }
}
