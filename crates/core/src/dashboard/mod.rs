//! Role-scoped dashboard views.
//!
//! Each view is computed from a [`Document`](crate::document::Document) snapshot by a pure
//! function taking the current time explicitly; [`crate::service::DataService`] reads the
//! store and supplies `Utc::now()`. Views never mutate the document.

mod activity;
mod admin;
mod analytics;
mod doctor;
mod user;

pub use activity::{merge_recent, Activity, ActivityKind};
pub use admin::{AdminDashboard, AdminStats};
pub use analytics::{Analytics, GlobalAnalytics, PersonalAnalytics, RecentRecord};
pub use doctor::{
    DoctorDashboard, DoctorPatient, DoctorRequest, DoctorStats, PatientCondition,
    UrgencyLabel,
};
pub use user::{UserDashboard, UserStats};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// The view a role lands on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dashboard {
    Admin(AdminDashboard),
    User(UserDashboard),
    Doctor(DoctorDashboard),
}

/// The last `n` items in insertion order.
pub(crate) fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// True when `at` falls in the same calendar month (and year) as `now`.
pub(crate) fn in_current_month(at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    at.year() == now.year() && at.month() == now.month()
}
