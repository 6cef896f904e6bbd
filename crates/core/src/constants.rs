//! Constants used throughout the blood bank core crate.
//!
//! Storage names, id prefixes, sentinel values and the fixed window sizes used by the
//! dashboards live here so that every module agrees on them.

/// Default directory for document storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "bank_data";

/// Default key under which the document is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "blood_bank";

/// File extension used by the file backend (`<key>.json`).
pub const DOCUMENT_FILE_EXTENSION: &str = "json";

/// Id prefix for generated user records.
pub const USER_ID_PREFIX: &str = "user";

/// Id prefix for generated donor records.
pub const DONOR_ID_PREFIX: &str = "donor";

/// Id prefix for generated donation records.
pub const DONATION_ID_PREFIX: &str = "donation";

/// Donor name recorded on a donation whose `donorId` did not resolve.
pub const UNKNOWN_DONOR_NAME: &str = "unknown donor";

/// Doctor name recorded on a request whose creating user did not resolve.
pub const UNKNOWN_DOCTOR_NAME: &str = "unknown doctor";

/// Number of most-recent records returned in dashboard lists and activity feeds.
pub const RECENT_LIMIT: usize = 5;

/// Number of records each source contributes to an activity feed before merging.
pub const ACTIVITY_PER_SOURCE: usize = 3;

/// Donors considered by the doctor view.
pub const DOCTOR_PATIENT_POOL: usize = 8;

/// Requests considered by the doctor view.
pub const DOCTOR_REQUEST_POOL: usize = 6;

/// Look-back window for the synthesised "last transfusion" timestamp, in days.
pub const DOCTOR_TRANSFUSION_WINDOW_DAYS: i64 = 7;
