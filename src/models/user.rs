use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// The User struct represents an authenticated account in the system,
/// matching the shape the backend returns from the auth endpoints.
///
/// Only identity fields are required; everything else is lenient with
/// defaults so a stored record from an older client version still loads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// Doctor-specific fields; absent for other roles.
    #[serde(default)]
    pub hospital_email: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_is_active() -> bool {
    true
}

impl User {
    /// Construct a User with the required identity fields; optional
    /// sub-profile data starts empty.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
    ) -> Self {
        User {
            id: id.into(),
            email: email.into(),
            full_name: full_name.into(),
            role,
            phone: None,
            is_active: true,
            is_verified: false,
            hospital_email: None,
            specialization: None,
            created_at: None,
        }
    }
}
