//! Role-scoped data access.
//!
//! [`DataService`] is what a presentation layer calls. Reads take a document snapshot from
//! the [`Store`] and hand it to the pure views in [`crate::dashboard`]; writes stamp the
//! acting user onto the record and go through the store's locked update cycle.

use crate::constants::UNKNOWN_DOCTOR_NAME;
use crate::dashboard::{AdminDashboard, Analytics, Dashboard, DoctorDashboard, UserDashboard};
use crate::models::{
    Donation, Donor, InventoryRecord, NewDonation, NewDonor, NewRequest, Request,
    RequestStatus, Role, User, UserStatus, UserSummary,
};
use crate::store::Store;
use crate::{BankError, BankResult};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

/// Pure blood bank data operations - no presentation concerns
#[derive(Clone, Debug)]
pub struct DataService {
    store: Arc<Store>,
}

impl DataService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ====================
    // Dashboards
    // ====================

    pub fn admin_dashboard(&self) -> AdminDashboard {
        AdminDashboard::from_document(&self.store.read(), Utc::now())
    }

    /// Returns `None` when `user_id` is not a known account.
    pub fn user_dashboard(&self, user_id: &str) -> Option<UserDashboard> {
        UserDashboard::from_document(&self.store.read(), user_id, Utc::now())
    }

    /// Doctor view using the thread-local random source.
    ///
    /// See [`DoctorDashboard`] for why this view is synthetic.
    pub fn doctor_dashboard(&self, current_doctor: Option<&str>) -> DoctorDashboard {
        self.doctor_dashboard_with_rng(current_doctor, &mut rand::thread_rng())
    }

    pub fn doctor_dashboard_with_rng<R: Rng>(
        &self,
        current_doctor: Option<&str>,
        rng: &mut R,
    ) -> DoctorDashboard {
        DoctorDashboard::from_document(&self.store.read(), current_doctor, Utc::now(), rng)
    }

    /// The landing view for `role`.
    ///
    /// Government oversight shares the admin view. Returns `None` only for the user view
    /// when `user_id` is unknown.
    pub fn dashboard_for(&self, role: Role, user_id: &str) -> Option<Dashboard> {
        match role {
            Role::Admin | Role::Government => Some(Dashboard::Admin(self.admin_dashboard())),
            Role::Doctor => Some(Dashboard::Doctor(self.doctor_dashboard(Some(user_id)))),
            Role::User => self.user_dashboard(user_id).map(Dashboard::User),
        }
    }

    pub fn analytics(&self, user_id: &str, role: Role) -> Analytics {
        Analytics::from_document(&self.store.read(), user_id, role)
    }

    // ====================
    // Scoped queries
    // ====================

    pub fn user_donors(&self, user_id: &str) -> Vec<Donor> {
        self.store.donors_by_user(user_id)
    }

    pub fn user_requests(&self, user_id: &str) -> Vec<Request> {
        self.store.requests_by_user(user_id)
    }

    /// Every account, without stored credentials.
    pub fn all_users(&self) -> Vec<UserSummary> {
        self.store.all_users().iter().map(UserSummary::from).collect()
    }

    pub fn inventory_status(&self) -> Vec<InventoryRecord> {
        self.store.inventory()
    }

    // ====================
    // Mutations
    // ====================

    pub fn add_donor(&self, new: NewDonor, user_id: &str) -> BankResult<Donor> {
        self.store.add_donor(new, user_id)
    }

    /// Adds a request on behalf of `user_id`, embedding that user's display name as the
    /// requesting doctor (or [`UNKNOWN_DOCTOR_NAME`] when the id does not resolve).
    pub fn add_request(&self, new: NewRequest, user_id: &str) -> BankResult<Request> {
        let doctor_name = self
            .store
            .find_user(user_id)
            .map(|u| u.name)
            .unwrap_or_else(|| UNKNOWN_DOCTOR_NAME.to_string());
        self.store.add_request(new, user_id, &doctor_name)
    }

    /// Records a donation by `user_id`. Donor details are snapshotted by the store.
    pub fn add_donation(&self, new: NewDonation, user_id: &str) -> BankResult<Donation> {
        self.store.add_donation(new, user_id)
    }

    /// Sets an account's status. Returns the updated account, or `None` if it does not exist.
    pub fn update_user_status(&self, user_id: &str, status: UserStatus) -> BankResult<Option<User>> {
        let updated = self.store.update(|doc| {
            let user = doc.user_mut(user_id)?;
            user.status = status;
            Some(user.clone())
        })?;

        if updated.is_some() {
            tracing::info!("user {} status set to {:?}", user_id, status);
        }
        Ok(updated)
    }

    /// Removes an account. Returns `false` if it does not exist.
    ///
    /// Records created by the account are left in place.
    pub fn delete_user(&self, user_id: &str) -> BankResult<bool> {
        let removed = self.store.update(|doc| {
            let index = doc.users.iter().position(|u| u.id == user_id)?;
            Some(doc.users.remove(index))
        })?;

        if removed.is_some() {
            tracing::info!("deleted user {}", user_id);
        }
        Ok(removed.is_some())
    }

    /// Moves a pending request to `status`, stamping when and by whom.
    ///
    /// Returns `None` when the request is unknown or has already left `pending`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidInput` if `status` is `pending`.
    pub fn process_request(
        &self,
        request_id: &str,
        status: RequestStatus,
        processed_by: &str,
    ) -> BankResult<Option<Request>> {
        if status.is_pending() {
            return Err(BankError::InvalidInput(format!(
                "request {} cannot be processed back to pending",
                request_id
            )));
        }

        let processed = self.store.update(|doc| {
            let request = doc.request_mut(request_id)?;
            if !request.status.is_pending() {
                return None;
            }
            request.status = status;
            request.processed_at = Some(Utc::now());
            request.processed_by = Some(processed_by.to_string());
            Some(request.clone())
        })?;

        match &processed {
            Some(r) => tracing::info!("request {} {} by {}", r.id, r.status, processed_by),
            None => tracing::debug!("request {} not pending or unknown", request_id),
        }
        Ok(processed)
    }
}
