//! Entity records held in the blood bank document.
//!
//! Each collection stores one record type. Records serialise with camelCase field names so
//! the persisted document keeps the layout the dashboard frontend expects:
//!
//! ```text
//! { "users": [...], "donors": [...], "requests": [...], "donations": [...], "inventory": [...] }
//! ```
//!
//! `New*` structs carry caller-supplied fields only. Identifiers, timestamps, ownership
//! stamps and derived fields are filled in by the store.

pub mod donation;
pub mod donor;
pub mod inventory;
pub mod request;
pub mod user;

pub use donation::{Donation, NewDonation};
pub use donor::{Donor, DonorStatus, NewDonor};
pub use inventory::InventoryRecord;
pub use request::{NewRequest, Request, RequestStatus};
pub use user::{NewUser, Role, User, UserStatus, UserSummary};
