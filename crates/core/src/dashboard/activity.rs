use crate::constants::RECENT_LIMIT;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    User,
    Donor,
    Request,
    Donation,
}

/// One entry in a recent-activity feed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Display name of the acting user.
    pub user: String,
}

/// Merges activity from several sources, newest first, keeping at most [`RECENT_LIMIT`].
///
/// Entries with equal timestamps keep their source order.
pub fn merge_recent(sources: impl IntoIterator<Item = Vec<Activity>>) -> Vec<Activity> {
    let mut merged: Vec<Activity> = sources.into_iter().flatten().collect();
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged.truncate(RECENT_LIMIT);
    merged
}
