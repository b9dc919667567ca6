//! Student identity

use serde::{Deserialize, Serialize};
use unievent_remote::{NewUser, UserRow};

/// Department assigned to students created on first login
pub const PLACEHOLDER_DEPARTMENT: &str = "Computer Science";
const EMAIL_DOMAIN: &str = "lpu.in";

/// 1 to 8 ASCII digits, nothing else
pub fn is_valid_registration_number(value: &str) -> bool {
    (1..=8).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub registration_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl User {
    /// Row inserted for a registration number the remote store has never seen
    pub fn placeholder(registration_number: &str) -> NewUser {
        NewUser {
            registration_number: registration_number.to_string(),
            name: format!("Student {registration_number}"),
            email: format!("{registration_number}@{EMAIL_DOMAIN}"),
            department: PLACEHOLDER_DEPARTMENT.to_string(),
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            registration_number: row.registration_number,
            name: row.name,
            email: row.email,
            department: row.department,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub registration_number: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(registration_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            password: password.into(),
        }
    }

    /// The password is only checked for presence
    pub fn is_well_formed(&self) -> bool {
        is_valid_registration_number(&self.registration_number) && !self.password.is_empty()
    }
}
