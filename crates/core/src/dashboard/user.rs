use super::{in_current_month, last_n, merge_recent, Activity, ActivityKind};
use crate::constants::{ACTIVITY_PER_SOURCE, RECENT_LIMIT};
use crate::document::Document;
use crate::models::{Donation, Donor, Request, UserSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_donors: usize,
    pub active_donors: usize,
    pub total_requests: usize,
    pub pending_requests: usize,
    pub total_donations: usize,
    pub donations_this_month: usize,
}

/// A user's own records: donors and requests they created, donations they recorded.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    pub user: UserSummary,
    pub stats: UserStats,
    pub recent_donors: Vec<Donor>,
    pub recent_requests: Vec<Request>,
    pub recent_donations: Vec<Donation>,
    pub recent_activities: Vec<Activity>,
}

impl UserDashboard {
    /// Returns `None` when `user_id` does not resolve to an account.
    pub fn from_document(doc: &Document, user_id: &str, now: DateTime<Utc>) -> Option<Self> {
        let user = doc.user(user_id)?;

        let donors: Vec<&Donor> = doc.donors_by_user(user_id).collect();
        let requests: Vec<&Request> = doc.requests_by_user(user_id).collect();
        let donations: Vec<&Donation> = doc.donations_by_user(user_id).collect();

        let stats = UserStats {
            total_donors: donors.len(),
            active_donors: donors.iter().filter(|d| d.is_active()).count(),
            total_requests: requests.len(),
            pending_requests: requests.iter().filter(|r| r.status.is_pending()).count(),
            total_donations: donations.len(),
            donations_this_month: donations
                .iter()
                .filter(|d| in_current_month(d.donation_date, now))
                .count(),
        };

        let donor_activity = last_n(&donors, ACTIVITY_PER_SOURCE)
            .iter()
            .map(|d| Activity {
                id: d.id.clone(),
                kind: ActivityKind::Donor,
                description: format!("Added donor {}", d.name),
                timestamp: d.created_at,
                user: user.name.clone(),
            })
            .collect();
        let request_activity = last_n(&requests, ACTIVITY_PER_SOURCE)
            .iter()
            .map(|r| Activity {
                id: r.id.clone(),
                kind: ActivityKind::Request,
                description: format!("Created transfusion request {}", r.id),
                timestamp: r.created_at,
                user: user.name.clone(),
            })
            .collect();
        let donation_activity = last_n(&donations, ACTIVITY_PER_SOURCE)
            .iter()
            .map(|d| Activity {
                id: d.id.clone(),
                kind: ActivityKind::Donation,
                description: format!("Recorded donation from {}", d.donor_name),
                timestamp: d.donation_date,
                user: user.name.clone(),
            })
            .collect();

        Some(Self {
            user: user.summary(),
            stats,
            recent_donors: cloned_tail(&donors),
            recent_requests: cloned_tail(&requests),
            recent_donations: cloned_tail(&donations),
            recent_activities: merge_recent([donor_activity, request_activity, donation_activity]),
        })
    }
}

fn cloned_tail<T: Clone>(items: &[&T]) -> Vec<T> {
    last_n(items, RECENT_LIMIT)
        .iter()
        .map(|item| (*item).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::PlaintextCredentials;
    use crate::seed::seed_document;
    use chrono::Duration;

    fn seeded() -> Document {
        seed_document(&PlaintextCredentials).expect("seed should succeed")
    }

    #[test]
    fn test_unknown_user_is_none() {
        assert!(UserDashboard::from_document(&seeded(), "user-404", Utc::now()).is_none());
    }

    #[test]
    fn test_records_are_scoped_to_owner() {
        let mut doc = seeded();
        let mut foreign = doc.donors[0].clone();
        foreign.id = "donor-foreign".into();
        foreign.created_by = "user-002".into();
        doc.donors.push(foreign);

        let dash = UserDashboard::from_document(&doc, "user-001", Utc::now())
            .expect("user-001 should resolve");

        let donor_ids: Vec<_> = dash.recent_donors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(donor_ids, vec!["donor-001", "donor-002"]);
        assert!(dash.recent_donors.iter().all(|d| d.created_by == "user-001"));
        assert!(dash.recent_requests.is_empty());
        assert!(dash.recent_donations.iter().all(|d| d.recorded_by == "user-001"));
        assert_eq!(dash.stats.total_donors, 2);
    }

    #[test]
    fn test_doctor_sees_own_request_only() {
        let doc = seeded();
        let dash = UserDashboard::from_document(&doc, "user-002", Utc::now()).expect("dashboard should build");

        assert_eq!(dash.stats.total_requests, 1);
        assert_eq!(dash.stats.pending_requests, 1);
        assert_eq!(dash.stats.total_donors, 0);
        assert_eq!(dash.recent_activities.len(), 1);
        assert_eq!(dash.recent_activities[0].user, "Dr. Li");
    }

    #[test]
    fn test_donations_this_month() {
        let mut doc = seeded();
        let now = Utc::now();
        let mut recent = doc.donations[0].clone();
        recent.id = "donation-2".into();
        recent.donation_date = now - Duration::seconds(1);
        doc.donations.push(recent);

        let dash = UserDashboard::from_document(&doc, "user-001", now).expect("dashboard should build");
        assert_eq!(dash.stats.total_donations, 2);
        assert_eq!(dash.stats.donations_this_month, 1);
    }

    #[test]
    fn test_activity_feed_truncates_to_five() {
        let mut doc = seeded();
        let now = Utc::now();
        let donor = doc.donors[0].clone();
        let donation = doc.donations[0].clone();
        for i in 0..4 {
            let mut d = donor.clone();
            d.id = format!("donor-n{i}");
            d.created_at = now - Duration::minutes(i);
            doc.donors.push(d);

            let mut n = donation.clone();
            n.id = format!("donation-n{i}");
            n.donation_date = now - Duration::minutes(10 + i);
            doc.donations.push(n);
        }

        let dash = UserDashboard::from_document(&doc, "user-001", now).expect("dashboard should build");

        assert_eq!(dash.recent_activities.len(), 5);
        assert!(dash
            .recent_activities
            .windows(2)
            .all(|w| w[0].timestamp > w[1].timestamp));
        assert_eq!(dash.recent_donors.len(), 5);
    }
}
