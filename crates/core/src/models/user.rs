//! Staff accounts and roles.

use crate::BankError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fmt, str::FromStr};

/// Account role. Gates which dashboard a user sees and the default permission set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Doctor,
    Government,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Doctor => "doctor",
            Self::Government => "government",
        }
    }

    /// Permissions granted to a new account of this role when none are supplied.
    pub const fn default_permissions(self) -> &'static [&'static str] {
        match self {
            Self::Admin => &["view_all", "manage_users", "manage_system", "view_reports"],
            Self::User => &["view_own", "view_reports"],
            Self::Doctor => &[
                "view_own",
                "view_reports",
                "manage_donors",
                "manage_requests",
            ],
            Self::Government => &[
                "view_all",
                "view_reports",
                "regulatory_oversight",
                "policy_compliance",
                "emergency_coordination",
            ],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "doctor" => Ok(Self::Doctor),
            "government" => Ok(Self::Government),
            other => Err(BankError::InvalidInput(format!("unknown role: '{}'", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// A staff account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub username: String,

    /// Stored credential as produced by the store's `CredentialVerifier`.
    #[serde(rename = "password")]
    pub credential: String,

    pub role: Role,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub login_count: u64,
}

impl User {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary::from(self)
    }
}

/// Registration input. `password` is plaintext here and hashed before it is stored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: UserStatus,

    /// Explicit permissions. `None` applies [`Role::default_permissions`].
    #[serde(default)]
    pub permissions: Option<BTreeSet<String>>,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            username: username.into(),
            password: password.into(),
            role,
            department: String::new(),
            status: UserStatus::Active,
            permissions: None,
        }
    }
}

/// Public projection of a [`User`] without the stored credential.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            department: user.department.clone(),
            status: user.status,
            last_login: user.last_login,
        }
    }
}
