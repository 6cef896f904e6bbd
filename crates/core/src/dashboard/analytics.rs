use super::last_n;
use crate::constants::RECENT_LIMIT;
use crate::document::Document;
use crate::models::{Donor, InventoryRecord, Request, Role};
use serde::Serialize;

/// System-wide counts, returned for administrators.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAnalytics {
    pub total_users: usize,
    pub total_donors: usize,
    pub total_requests: usize,
    pub total_donations: usize,
    pub pending_requests: usize,
    pub inventory_status: Vec<InventoryRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecentRecord {
    Donor(Donor),
    Request(Request),
}

/// Counts over the caller's own records.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAnalytics {
    pub my_donors: usize,
    pub my_requests: usize,
    pub my_donations: usize,
    /// Last own donors followed by last own requests. Not sorted by time.
    pub recent_activity: Vec<RecentRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analytics {
    Global(GlobalAnalytics),
    Personal(PersonalAnalytics),
}

impl Analytics {
    /// Admins get the global summary; every other role gets counts scoped to `user_id`.
    pub fn from_document(doc: &Document, user_id: &str, role: Role) -> Self {
        if role == Role::Admin {
            return Self::Global(GlobalAnalytics {
                total_users: doc.users.len(),
                total_donors: doc.donors.len(),
                total_requests: doc.requests.len(),
                total_donations: doc.donations.len(),
                pending_requests: doc.pending_request_count(),
                inventory_status: doc.inventory.clone(),
            });
        }

        let donors: Vec<&Donor> = doc.donors_by_user(user_id).collect();
        let requests: Vec<&Request> = doc.requests_by_user(user_id).collect();

        let recent_activity = last_n(&donors, RECENT_LIMIT)
            .iter()
            .map(|d| RecentRecord::Donor((*d).clone()))
            .chain(
                last_n(&requests, RECENT_LIMIT)
                    .iter()
                    .map(|r| RecentRecord::Request((*r).clone())),
            )
            .collect();

        Self::Personal(PersonalAnalytics {
            my_donors: donors.len(),
            my_requests: requests.len(),
            my_donations: doc.donations_by_user(user_id).count(),
            recent_activity,
        })
    }
}
