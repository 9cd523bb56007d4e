use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account state. Anything other than `active` is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    #[serde(untagged)]
    Other(String),
}

impl UserStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

/// A registered account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    /// Unique across users, compared case-sensitively
    pub email: String,
    /// Argon2 PHC string, or plaintext for legacy records
    pub password: String,
    pub registered_at: DateTime<Utc>,
    pub status: UserStatus,
}

impl User {
    pub fn new(id: u64, name: String, email: String, password: String, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            password,
            registered_at,
            status: UserStatus::Active,
        }
    }
}

/// A user as shown to other parties: never carries the password
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub status: UserStatus,
    pub is_admin: bool,
}

impl UserSummary {
    pub fn from_user(user: &User, is_admin: bool) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            registered_at: user.registered_at,
            status: user.status.clone(),
            is_admin,
        }
    }
}

/// The logged-in user's account page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: UserSummary,
    pub issue_count: usize,
    pub rating_count: usize,
}
