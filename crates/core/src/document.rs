//! The root document: every collection in one serialisable value.
//!
//! The document is the single unit of persistence. There is no per-record storage and no
//! partial write; the store always reads, mutates and writes the whole value.

use crate::models::{Donation, Donor, InventoryRecord, Request, User};
use bloodbank_types::BloodType;
use serde::{Deserialize, Serialize};

/// All entity collections.
///
/// Missing collections deserialise as empty and unknown top-level keys are ignored, so a
/// document written by an older or newer layout still opens.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub users: Vec<User>,
    pub donors: Vec<Donor>,
    pub requests: Vec<Request>,
    pub donations: Vec<Donation>,
    pub inventory: Vec<InventoryRecord>,
}

impl Document {
    /// Parse a stored document.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Render the document for storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn donor(&self, donor_id: &str) -> Option<&Donor> {
        self.donors.iter().find(|d| d.id == donor_id)
    }

    pub fn request_mut(&mut self, request_id: &str) -> Option<&mut Request> {
        self.requests.iter_mut().find(|r| r.id == request_id)
    }

    pub fn inventory_mut(&mut self, blood_type: BloodType) -> Option<&mut InventoryRecord> {
        self.inventory.iter_mut().find(|i| i.blood_type == blood_type)
    }

    pub fn donors_by_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Donor> {
        self.donors.iter().filter(move |d| d.created_by == user_id)
    }

    pub fn requests_by_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a Request> {
        self.requests.iter().filter(move |r| r.created_by == user_id)
    }

    pub fn donations_by_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a Donation> {
        self.donations.iter().filter(move |d| d.recorded_by == user_id)
    }

    /// Number of requests whose status is exactly `pending`.
    pub fn pending_request_count(&self) -> usize {
        self.requests.iter().filter(|r| r.status.is_pending()).count()
    }
}
