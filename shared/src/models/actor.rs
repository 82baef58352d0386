//! Actor and role models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Coordinate;

/// Any identity interacting with the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    /// Home or operating location, if the actor shared one
    pub location: Option<Coordinate>,
}

/// Role an actor holds on the platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Donor,
    Ngo,
    Volunteer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Ngo => "ngo",
            Role::Volunteer => "volunteer",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "donor" => Some(Role::Donor),
            "ngo" => Some(Role::Ngo),
            "volunteer" => Some(Role::Volunteer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles that may accept an available donation
    pub fn can_accept(&self) -> bool {
        matches!(self, Role::Ngo | Role::Volunteer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
