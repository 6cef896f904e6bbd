//! Document store.
//!
//! The [`Store`] owns the persisted document: seeding on first run, whole-document reads and
//! writes, and the per-entity create operations. Every mutation is a complete
//! read-modify-write cycle performed under the store's write lock, so threads sharing one
//! `Arc<Store>` never lose each other's updates. Writers in other processes still race at
//! whole-document granularity (last write wins).
//!
//! A store is constructed explicitly and handed to the services that need it:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use std::path::PathBuf;
//! # use bloodbank_core::{CoreConfig, CredentialScheme, DataService, NonEmptyText, Store};
//! let cfg = CoreConfig::new(
//!     PathBuf::from("bank_data"),
//!     NonEmptyText::new("blood_bank")?,
//!     CredentialScheme::Argon2,
//! )?;
//! let store = Arc::new(Store::open(Arc::new(cfg)));
//! store.initialise()?;
//! let service = DataService::new(store.clone());
//! # Ok::<(), bloodbank_core::BankError>(())
//! ```

use crate::backend::{DocumentBackend, FileBackend, MemoryBackend};
use crate::constants::{
    DONATION_ID_PREFIX, DONOR_ID_PREFIX, UNKNOWN_DONOR_NAME, USER_ID_PREFIX,
};
use crate::credentials::CredentialVerifier;
use crate::document::Document;
use crate::models::{
    Donation, Donor, InventoryRecord, NewDonation, NewDonor, NewRequest, NewUser, Request,
    RequestStatus, User,
};
use crate::seed::seed_document;
use crate::{BankError, BankResult, CoreConfig};
use bloodbank_ids::{RequestId, TimestampId};
use bloodbank_types::{BloodType, NonEmptyText};
use chrono::Utc;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Explicitly constructed handle to the persisted document.
pub struct Store {
    cfg: Arc<CoreConfig>,
    backend: Box<dyn DocumentBackend>,
    credentials: Arc<dyn CredentialVerifier>,
    write_lock: Mutex<()>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("storage_key", &self.cfg.storage_key())
            .field("backend", &self.backend)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl Store {
    pub fn new(
        cfg: Arc<CoreConfig>,
        backend: Box<dyn DocumentBackend>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            cfg,
            backend,
            credentials,
            write_lock: Mutex::new(()),
        }
    }

    /// File-backed store rooted at `cfg.data_dir()`, using the configured credential scheme.
    pub fn open(cfg: Arc<CoreConfig>) -> Self {
        let backend = FileBackend::new(cfg.data_dir());
        let credentials = cfg.credential_scheme().verifier();
        Self::new(cfg, Box::new(backend), credentials)
    }

    /// Store backed by an empty [`MemoryBackend`].
    pub fn in_memory(cfg: Arc<CoreConfig>, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self::new(cfg, Box::new(MemoryBackend::new()), credentials)
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn credentials(&self) -> &dyn CredentialVerifier {
        self.credentials.as_ref()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ====================
    // Document lifecycle
    // ====================

    /// Writes the seed document if nothing is stored under the configured key.
    ///
    /// Returns `true` if the seed was written. An existing document is never replaced, even
    /// one that fails to parse.
    ///
    /// # Errors
    ///
    /// Returns a `BankError` if the backend cannot be read or written, or if hashing a seed
    /// password fails.
    pub fn initialise(&self) -> BankResult<bool> {
        let _guard = self.lock();

        if self.backend.load(self.cfg.storage_key())?.is_some() {
            tracing::debug!("document '{}' already present", self.cfg.storage_key());
            return Ok(false);
        }

        let seed = seed_document(self.credentials.as_ref())?;
        self.persist(&seed)?;
        tracing::info!("seeded document '{}'", self.cfg.storage_key());
        Ok(true)
    }

    /// Returns the current document.
    ///
    /// Never fails: a missing document, a backend read error and a document that does not
    /// parse all yield an empty document. The latter two are logged.
    pub fn read(&self) -> Document {
        self.load_document().unwrap_or_else(|e| {
            tracing::warn!(
                "failed to load document '{}': {}",
                self.cfg.storage_key(),
                e
            );
            Document::default()
        })
    }

    /// Loads the stored document, treating a missing or unparseable one as empty.
    ///
    /// A backend read error is returned as is.
    fn load_document(&self) -> BankResult<Document> {
        let key = self.cfg.storage_key();
        let Some(raw) = self.backend.load(key)? else {
            return Ok(Document::default());
        };

        match Document::from_json(&raw) {
            Ok(doc) => {
                tracing::debug!("read document '{}'", key);
                Ok(doc)
            }
            Err(e) => {
                tracing::warn!("document '{}' is corrupt, using empty document: {}", key, e);
                Ok(Document::default())
            }
        }
    }

    /// Persists `document`, replacing whatever was stored.
    pub fn write(&self, document: &Document) -> BankResult<()> {
        let _guard = self.lock();
        self.persist(document)
    }

    fn persist(&self, document: &Document) -> BankResult<()> {
        let raw = document.to_json().map_err(BankError::Serialization)?;
        self.backend.save(self.cfg.storage_key(), &raw)
    }

    /// Runs one read-modify-write cycle under the write lock.
    ///
    /// The document is written back only when `f` returns `Ok(Some(_))`. Returning
    /// `Ok(None)` or an error leaves the stored document untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the stored document cannot be loaded; `f` is not run
    /// and nothing is written.
    pub fn try_update<T>(
        &self,
        f: impl FnOnce(&mut Document) -> BankResult<Option<T>>,
    ) -> BankResult<Option<T>> {
        let _guard = self.lock();
        let mut doc = self.load_document()?;

        let outcome = f(&mut doc)?;
        if outcome.is_some() {
            self.persist(&doc)?;
        }
        Ok(outcome)
    }

    /// Infallible-closure form of [`Store::try_update`].
    pub fn update<T>(&self, f: impl FnOnce(&mut Document) -> Option<T>) -> BankResult<Option<T>> {
        self.try_update(|doc| Ok(f(doc)))
    }

    // ====================
    // Creation
    // ====================

    /// Registers a user account.
    ///
    /// The password is hashed with the store's credential verifier. When `permissions` is
    /// `None` the role's default permissions are applied.
    ///
    /// # Errors
    ///
    /// - `BankError::Text` if the name or username is blank.
    /// - `BankError::UsernameExists` if another account already has this exact username.
    /// - `BankError::CredentialHash` if hashing fails.
    pub fn add_user(&self, new: NewUser) -> BankResult<User> {
        let name = NonEmptyText::new(&new.name)?;
        let username = NonEmptyText::new(&new.username)?;
        let credential = self.credentials.hash(&new.password)?;

        let user = self.try_update(|doc| {
            if doc.user_by_username(username.as_str()).is_some() {
                return Err(BankError::UsernameExists(username.to_string()));
            }

            let id = TimestampId::next_after(
                USER_ID_PREFIX,
                doc.users.iter().map(|u| u.id.as_str()),
            )?;
            let permissions = new.permissions.unwrap_or_else(|| {
                new.role
                    .default_permissions()
                    .iter()
                    .map(|p| p.to_string())
                    .collect()
            });

            let user = User {
                id: id.to_string(),
                name: name.into_inner(),
                email: new.email,
                username: username.into_inner(),
                credential,
                role: new.role,
                department: new.department,
                status: new.status,
                permissions,
                created_at: Utc::now(),
                last_login: None,
                login_count: 0,
            };
            doc.users.push(user.clone());
            Ok(Some(user))
        })?;

        let user = user.ok_or_else(|| BankError::InvalidInput("user was not created".into()))?;
        tracing::info!("added user {} ({})", user.id, user.role);
        Ok(user)
    }

    /// Adds a donor owned by `created_by`.
    pub fn add_donor(&self, new: NewDonor, created_by: &str) -> BankResult<Donor> {
        let name = NonEmptyText::new(&new.name)?;

        let donor = self.try_update(|doc| {
            let id = TimestampId::next_after(
                DONOR_ID_PREFIX,
                doc.donors.iter().map(|d| d.id.as_str()),
            )?;
            let donor = Donor {
                id: id.to_string(),
                name: name.into_inner(),
                blood_type: new.blood_type,
                phone: new.phone,
                id_card: new.id_card,
                address: new.address,
                status: new.status,
                last_donation: None,
                total_donations: 0,
                notes: new.notes,
                created_by: created_by.to_string(),
                created_at: Utc::now(),
            };
            doc.donors.push(donor.clone());
            Ok(Some(donor))
        })?;

        let donor = donor.ok_or_else(|| BankError::InvalidInput("donor was not created".into()))?;
        tracing::info!("added donor {} for user {}", donor.id, created_by);
        Ok(donor)
    }

    /// Adds a pending transfusion request.
    ///
    /// The id is `REQ-<year>-<seq>` where `seq` is the number of requests already stored
    /// plus one.
    pub fn add_request(
        &self,
        new: NewRequest,
        created_by: &str,
        doctor_name: &str,
    ) -> BankResult<Request> {
        let patient_name = NonEmptyText::new(&new.patient_name)?;

        let request = self.update(|doc| {
            let id = RequestId::next(doc.requests.len());
            let request = Request {
                id: id.to_string(),
                patient_name: patient_name.into_inner(),
                patient_age: new.patient_age,
                blood_type: new.blood_type,
                amount: new.amount,
                urgency: new.urgency,
                status: RequestStatus::Pending,
                diagnosis: new.diagnosis,
                surgery_type: new.surgery_type,
                notes: new.notes,
                doctor_name: doctor_name.to_string(),
                created_by: created_by.to_string(),
                created_at: Utc::now(),
                processed_at: None,
                processed_by: None,
            };
            doc.requests.push(request.clone());
            Some(request)
        })?;

        let request =
            request.ok_or_else(|| BankError::InvalidInput("request was not created".into()))?;
        tracing::info!("added request {} for user {}", request.id, created_by);
        Ok(request)
    }

    /// Records a donation.
    ///
    /// The donor's name and blood type are snapshotted onto the donation. If `donor_id` does
    /// not resolve, the donation is still recorded with [`UNKNOWN_DONOR_NAME`] and no blood
    /// type. A resolved donor has its donation count and last donation date updated.
    pub fn add_donation(&self, new: NewDonation, recorded_by: &str) -> BankResult<Donation> {
        let donation = self.try_update(|doc| {
            let now = Utc::now();
            let id = TimestampId::next_after(
                DONATION_ID_PREFIX,
                doc.donations.iter().map(|d| d.id.as_str()),
            )?;

            let (donor_name, blood_type) = match doc.donors.iter_mut().find(|d| d.id == new.donor_id)
            {
                Some(donor) => {
                    donor.total_donations = donor.total_donations.saturating_add(1);
                    donor.last_donation = Some(now);
                    (donor.name.clone(), Some(donor.blood_type))
                }
                None => {
                    tracing::warn!(
                        "donation references unknown donor '{}', recording as {}",
                        new.donor_id,
                        UNKNOWN_DONOR_NAME
                    );
                    (UNKNOWN_DONOR_NAME.to_string(), None)
                }
            };

            let donation = Donation {
                id: id.to_string(),
                donor_id: new.donor_id,
                donor_name,
                blood_type,
                amount: new.amount,
                donation_type: new.donation_type,
                health_status: new.health_status,
                notes: new.notes,
                donation_date: now,
                recorded_by: recorded_by.to_string(),
            };
            doc.donations.push(donation.clone());
            Ok(Some(donation))
        })?;

        let donation =
            donation.ok_or_else(|| BankError::InvalidInput("donation was not recorded".into()))?;
        tracing::info!("recorded donation {} by user {}", donation.id, recorded_by);
        Ok(donation)
    }

    // ====================
    // Lookup
    // ====================

    /// Returns the first account whose username matches exactly and whose stored credential
    /// verifies against `password`.
    ///
    /// A stored credential the verifier cannot parse counts as a non-match and is logged.
    pub fn find_user_by_credentials(&self, username: &str, password: &str) -> Option<User> {
        let doc = self.read();
        doc.users
            .into_iter()
            .filter(|u| u.username == username)
            .find(|u| match self.credentials.verify(password, &u.credential) {
                Ok(matched) => matched,
                Err(e) => {
                    tracing::warn!("cannot verify credential for user {}: {}", u.id, e);
                    false
                }
            })
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.read().user_by_username(username).cloned()
    }

    pub fn find_user(&self, user_id: &str) -> Option<User> {
        self.read().user(user_id).cloned()
    }

    pub fn all_users(&self) -> Vec<User> {
        self.read().users
    }

    pub fn all_donors(&self) -> Vec<Donor> {
        self.read().donors
    }

    pub fn all_requests(&self) -> Vec<Request> {
        self.read().requests
    }

    pub fn all_donations(&self) -> Vec<Donation> {
        self.read().donations
    }

    pub fn inventory(&self) -> Vec<InventoryRecord> {
        self.read().inventory
    }

    pub fn donors_by_user(&self, user_id: &str) -> Vec<Donor> {
        self.read().donors_by_user(user_id).cloned().collect()
    }

    pub fn requests_by_user(&self, user_id: &str) -> Vec<Request> {
        self.read().requests_by_user(user_id).cloned().collect()
    }

    pub fn donations_by_user(&self, user_id: &str) -> Vec<Donation> {
        self.read().donations_by_user(user_id).cloned().collect()
    }

    // ====================
    // Inventory
    // ====================

    /// Adds `delta` to the stock level for `blood_type`, clamping at zero.
    ///
    /// Returns `None` and writes nothing when there is no record for `blood_type`; a record
    /// is never created here.
    pub fn update_inventory(
        &self,
        blood_type: BloodType,
        delta: i64,
    ) -> BankResult<Option<InventoryRecord>> {
        let updated = self.update(|doc| {
            let record = doc.inventory_mut(blood_type)?;
            record.adjust(delta, Utc::now());
            Some(record.clone())
        })?;

        match &updated {
            Some(record) => tracing::info!(
                "inventory {} adjusted by {} to {}",
                blood_type,
                delta,
                record.amount
            ),
            None => tracing::debug!("no inventory record for {}", blood_type),
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::PlaintextCredentials;
    use crate::models::{DonorStatus, Role};
    use crate::test_support::{memory_store, memory_store_with, test_config, DASHBOARD_DOCUMENT};
    use chrono::Datelike;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    /// Memory backend whose loads fail while `failing` is set.
    #[derive(Debug)]
    struct FlakyBackend {
        inner: MemoryBackend,
        failing: Arc<AtomicBool>,
    }

    impl DocumentBackend for FlakyBackend {
        fn load(&self, key: &str) -> BankResult<Option<String>> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(BankError::FileRead(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "device unavailable",
                )));
            }
            self.inner.load(key)
        }

        fn save(&self, key: &str, contents: &str) -> BankResult<()> {
            self.inner.save(key, contents)
        }
    }

    fn flaky_store() -> (Store, Arc<AtomicBool>) {
        let failing = Arc::new(AtomicBool::new(false));
        let backend = FlakyBackend {
            inner: MemoryBackend::new(),
            failing: failing.clone(),
        };
        let store = Store::new(test_config(), Box::new(backend), Arc::new(PlaintextCredentials));
        (store, failing)
    }

    #[test]
    fn test_initialise_seeds_once() {
        let store = memory_store();

        assert!(store.initialise().expect("initialise should succeed"));
        store
            .add_donor(NewDonor::new("Extra", BloodType::BNegative), "user-001")
            .expect("add_donor should succeed");

        assert!(!store.initialise().expect("initialise should succeed"));
        assert_eq!(store.all_donors().len(), 3);
    }

    #[test]
    fn test_initialise_does_not_replace_corrupt_document() {
        let cfg = test_config();
        let store = Store::new(
            cfg,
            Box::new(MemoryBackend::with_entry("blood_bank", "not json")),
            Arc::new(PlaintextCredentials),
        );

        assert!(!store.initialise().expect("initialise should succeed"));
        assert_eq!(store.read(), Document::default());
    }

    #[test]
    fn test_read_missing_document_is_empty() {
        let store = memory_store();
        assert_eq!(store.read(), Document::default());
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");
        let mut doc = store.read();
        doc.requests[0].status = RequestStatus::Other("on-hold".into());
        doc.donors[1].status = DonorStatus::Deferred;

        store.write(&doc).expect("write should succeed");

        assert_eq!(store.read(), doc);
    }

    #[test]
    fn test_failed_load_aborts_update_without_writing() {
        let (store, failing) = flaky_store();
        store.initialise().expect("initialise should succeed");

        failing.store(true, Ordering::SeqCst);
        let err = store
            .add_donor(NewDonor::new("Zhao", BloodType::BPositive), "user-001")
            .expect_err("add_donor should fail while the backend cannot load");
        assert!(matches!(err, BankError::FileRead(_)));
        assert_eq!(store.read(), Document::default());

        failing.store(false, Ordering::SeqCst);
        let doc = store.read();
        assert_eq!(doc.users.len(), 4);
        assert_eq!(doc.donors.len(), 2);
        assert_eq!(doc.inventory.len(), 2);
        assert_eq!(doc.requests.len(), 1);
    }

    #[test]
    fn test_failed_load_aborts_every_writer() {
        let (store, failing) = flaky_store();
        store.initialise().expect("initialise should succeed");
        let before = store.read();

        failing.store(true, Ordering::SeqCst);
        assert!(store
            .add_user(NewUser::new("Chen", "chen", "pw", Role::User))
            .is_err());
        assert!(store
            .add_request(NewRequest::new("Patient", BloodType::APositive, 200), "user-002", "Dr. Li")
            .is_err());
        assert!(store
            .add_donation(NewDonation::new("donor-001", 200), "user-001")
            .is_err());
        assert!(store.update_inventory(BloodType::APositive, 100).is_err());

        failing.store(false, Ordering::SeqCst);
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_add_donor_after_max_stored_id_fails_cleanly() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");
        let mut doc = store.read();
        doc.donors[0].id = format!("donor-{}", i64::MAX);
        store.write(&doc).expect("write should succeed");

        let err = store
            .add_donor(NewDonor::new("Zhao", BloodType::BPositive), "user-001")
            .expect_err("no donor id follows the maximum");
        assert!(matches!(err, BankError::Id(bloodbank_ids::IdError::Exhausted(_))));
        assert_eq!(store.read(), doc);
    }

    #[test]
    fn test_dashboard_document_keeps_every_collection_across_writes() {
        let store = memory_store_with(DASHBOARD_DOCUMENT);
        assert!(!store.initialise().expect("initialise should succeed"));

        let donor = store
            .add_donor(NewDonor::new("Sun Qi", BloodType::ONegative), "user-001")
            .expect("add_donor should succeed");
        assert!(donor.id.starts_with("donor-"));

        let doc = store.read();
        assert_eq!(doc.users.len(), 4);
        assert_eq!(doc.donors.len(), 3);
        assert_eq!(doc.donations.len(), 2);
        assert_eq!(doc.donations[1].blood_type, None);
        assert_eq!(doc.inventory.len(), 2);
        assert!(store.find_user_by_credentials("doctor", "doctor123").is_some());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");

        for i in 0..20 {
            store
                .add_donor(NewDonor::new(format!("Donor {i}"), BloodType::AbPositive), "u1")
                .expect("add_donor should succeed");
            store
                .add_request(NewRequest::new(format!("Patient {i}"), BloodType::ONegative, 200), "u1", "Dr. X")
                .expect("add_request should succeed");
            store
                .add_donation(NewDonation::new("donor-001", 200), "u1")
                .expect("add_donation should succeed");
        }

        let doc = store.read();
        let donor_ids: HashSet<_> = doc.donors.iter().map(|d| &d.id).collect();
        let request_ids: HashSet<_> = doc.requests.iter().map(|r| &r.id).collect();
        let donation_ids: HashSet<_> = doc.donations.iter().map(|d| &d.id).collect();
        assert_eq!(donor_ids.len(), doc.donors.len());
        assert_eq!(request_ids.len(), doc.requests.len());
        assert_eq!(donation_ids.len(), doc.donations.len());
    }

    #[test]
    fn test_request_id_uses_year_and_count() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");

        let request = store
            .add_request(NewRequest::new("Patient", BloodType::APositive, 400), "user-002", "Dr. Li")
            .expect("add_request should succeed");

        let year = Utc::now().year();
        assert_eq!(request.id, format!("REQ-{year}-002"));
        assert!(request.status.is_pending());
        assert!(request.processed_at.is_none());
    }

    #[test]
    fn test_add_donation_snapshots_donor() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");

        let donation = store
            .add_donation(NewDonation::new("donor-002", 300), "user-001")
            .expect("add_donation should succeed");

        assert_eq!(donation.donor_name, "Li Xiaohong");
        assert_eq!(donation.blood_type, Some(BloodType::OPositive));

        let doc = store.read();
        let donor = doc.donor("donor-002").expect("donor should exist");
        assert_eq!(donor.total_donations, 9);
        assert_eq!(donor.last_donation, Some(donation.donation_date));
    }

    #[test]
    fn test_add_donation_unknown_donor_uses_sentinel() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");
        let before = store.all_donors();

        let donation = store
            .add_donation(NewDonation::new("donor-missing", 300), "user-001")
            .expect("unknown donor should not fail");

        assert_eq!(donation.donor_name, UNKNOWN_DONOR_NAME);
        assert_eq!(donation.blood_type, None);
        assert_eq!(store.all_donors(), before);
    }

    #[test]
    fn test_add_user_rejects_duplicate_username() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");

        let err = store
            .add_user(NewUser::new("Someone", "admin", "pw", Role::User))
            .expect_err("duplicate username should fail");
        assert!(matches!(err, BankError::UsernameExists(ref u) if u == "admin"));
        assert_eq!(store.all_users().len(), 4);
    }

    #[test]
    fn test_add_user_applies_role_defaults() {
        let store = memory_store();

        let user = store
            .add_user(NewUser::new("Nurse Chen", "chen", "pw", Role::Doctor))
            .expect("add_user should succeed");

        assert!(user.id.starts_with("user-"));
        assert!(user.has_permission("manage_requests"));
        assert_eq!(user.login_count, 0);
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_add_user_rejects_blank_username() {
        let store = memory_store();
        assert!(store
            .add_user(NewUser::new("Name", "   ", "pw", Role::User))
            .is_err());
        assert!(store.all_users().is_empty());
    }

    #[test]
    fn test_find_user_by_credentials_requires_both_fields() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");

        assert!(store.find_user_by_credentials("admin", "admin123").is_some());
        assert!(store.find_user_by_credentials("admin", "wrong").is_none());
        assert!(store.find_user_by_credentials("doctor", "admin123").is_none());
        assert!(store.find_user_by_credentials("Admin", "admin123").is_none());
    }

    #[test]
    fn test_update_inventory_clamps_at_zero() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");
        let mut doc = store.read();
        doc.inventory_mut(BloodType::APositive).expect("record should exist").amount = 50;
        store.write(&doc).expect("write should succeed");

        let record = store
            .update_inventory(BloodType::APositive, -10_000)
            .expect("update_inventory should succeed")
            .expect("A+ record should exist");

        assert_eq!(record.amount, 0);
        assert_eq!(
            store.read().inventory_mut(BloodType::APositive).expect("record should exist").amount,
            0
        );
    }

    #[test]
    fn test_update_inventory_unknown_type_leaves_document_unchanged() {
        let store = memory_store();
        store.initialise().expect("initialise should succeed");
        let before = store.read();

        let result = store
            .update_inventory(BloodType::AbNegative, 100)
            .expect("update_inventory should succeed");

        assert!(result.is_none());
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_file_backed_store_persists_across_instances() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = Arc::new(
            CoreConfig::new(
                temp_dir.path().to_path_buf(),
                NonEmptyText::new("blood_bank").expect("new should succeed"),
                crate::CredentialScheme::Plaintext,
            )
            .expect("CoreConfig::new should succeed"),
        );

        let first = Store::open(cfg.clone());
        assert!(first.initialise().expect("initialise should succeed"));
        let donor = first
            .add_donor(NewDonor::new("Zhao", BloodType::BPositive), "user-001")
            .expect("add_donor should succeed");

        let second = Store::open(cfg.clone());
        assert!(!second.initialise().expect("initialise should succeed"));
        assert!(second.read().donor(&donor.id).is_some());
        assert!(cfg.document_path().is_file());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("blood_bank.json"), "{\"users\": [").expect("write should succeed");
        let cfg = Arc::new(
            CoreConfig::new(
                temp_dir.path().to_path_buf(),
                NonEmptyText::new("blood_bank").expect("new should succeed"),
                crate::CredentialScheme::Plaintext,
            )
            .expect("new should succeed"),
        );

        let store = Store::open(cfg);
        assert_eq!(store.read(), Document::default());
    }

    #[test]
    fn test_concurrent_writers_do_not_lose_updates() {
        let store = Arc::new(memory_store());
        store.initialise().expect("initialise should succeed");

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .add_donor(NewDonor::new(format!("T{t} D{i}"), BloodType::OPositive), "u")
                            .expect("add_donor should succeed");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should finish");
        }

        assert_eq!(store.all_donors().len(), 2 + 40);
    }
}
