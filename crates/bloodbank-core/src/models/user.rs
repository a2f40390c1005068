//! Signed-in user models.

use serde::{Deserialize, Serialize};

use super::donor::Donor;

/// Role tag used for view dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Donor,
    Admin,
    Hospital,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "DONOR",
            Role::Admin => "ADMIN",
            Role::Hospital => "HOSPITAL",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DONOR" => Ok(Role::Donor),
            "ADMIN" => Ok(Role::Admin),
            "HOSPITAL" => Ok(Role::Hospital),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Blood bank administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Hospital staff member requesting blood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HospitalStaff {
    pub id: String,
    pub name: String,
    pub email: String,
    pub hospital_name: String,
}

/// The signed-in user, tagged by role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum User {
    Donor(Donor),
    Admin(Admin),
    Hospital(HospitalStaff),
}

impl User {
    pub fn role(&self) -> Role {
        match self {
            User::Donor(_) => Role::Donor,
            User::Admin(_) => Role::Admin,
            User::Hospital(_) => Role::Hospital,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            User::Donor(d) => &d.id,
            User::Admin(a) => &a.id,
            User::Hospital(h) => &h.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            User::Donor(d) => &d.name,
            User::Admin(a) => &a.name,
            User::Hospital(h) => &h.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            User::Donor(d) => &d.email,
            User::Admin(a) => &a.email,
            User::Hospital(h) => &h.email,
        }
    }
}
