use super::{in_current_month, last_n, merge_recent, Activity, ActivityKind};
use crate::constants::{ACTIVITY_PER_SOURCE, RECENT_LIMIT};
use crate::document::Document;
use crate::models::UserSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub total_donors: usize,
    pub total_requests: usize,
    pub total_donations: usize,
    pub pending_requests: usize,
    pub active_users: usize,
    pub new_this_month: usize,
}

/// System-wide overview for administrators (and government oversight).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    /// Last accounts by insertion order, not by `createdAt`.
    pub recent_users: Vec<UserSummary>,
    pub recent_activities: Vec<Activity>,
}

impl AdminDashboard {
    pub fn from_document(doc: &Document, now: DateTime<Utc>) -> Self {
        let stats = AdminStats {
            total_users: doc.users.len(),
            total_donors: doc.donors.len(),
            total_requests: doc.requests.len(),
            total_donations: doc.donations.len(),
            pending_requests: doc.pending_request_count(),
            active_users: doc.users.iter().filter(|u| u.is_active()).count(),
            new_this_month: doc
                .users
                .iter()
                .filter(|u| in_current_month(u.created_at, now))
                .count(),
        };

        let recent_users = last_n(&doc.users, RECENT_LIMIT)
            .iter()
            .map(UserSummary::from)
            .collect();

        let user_activity = last_n(&doc.users, ACTIVITY_PER_SOURCE)
            .iter()
            .map(|u| Activity {
                id: u.id.clone(),
                kind: ActivityKind::User,
                description: format!("New user {} registered", u.name),
                timestamp: u.created_at,
                user: u.name.clone(),
            })
            .collect();
        let request_activity = last_n(&doc.requests, ACTIVITY_PER_SOURCE)
            .iter()
            .map(|r| Activity {
                id: r.id.clone(),
                kind: ActivityKind::Request,
                description: format!("Transfusion request {} created", r.id),
                timestamp: r.created_at,
                user: r.doctor_name.clone(),
            })
            .collect();

        Self {
            stats,
            recent_users,
            recent_activities: merge_recent([user_activity, request_activity]),
        }
    }
}
