//! # Blood Bank Core
//!
//! Core data layer for the blood bank management system.
//!
//! This crate contains the persisted document and the operations on it:
//! - A [`Store`] that owns one JSON document holding every collection, seeds it on first run
//!   and serialises read-modify-write cycles behind a lock
//! - Role-scoped dashboard and analytics views computed by [`DataService`]
//! - Login and registration through [`AuthService`] with pluggable credential hashing
//!
//! **No presentation concerns**: rendering, routing and HTTP surfaces belong to callers.
//! The crate logs through `tracing` but never installs a subscriber.

pub mod auth;
pub mod backend;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod dashboard;
pub mod document;
pub mod error;
pub mod models;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use auth::AuthService;
pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use config::CoreConfig;
pub use credentials::{Argon2Credentials, CredentialScheme, CredentialVerifier, PlaintextCredentials};
pub use dashboard::Dashboard;
pub use document::Document;
pub use error::{BankError, BankResult};
pub use service::DataService;
pub use store::Store;

pub use bloodbank_ids::{RequestId, TimestampId};
pub use bloodbank_types::{BloodType, NonEmptyText};
