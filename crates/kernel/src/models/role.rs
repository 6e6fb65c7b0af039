//! Role model.
//!
//! Flowdesk has exactly two authorization tiers. The stored value on a
//! profile is a free-form string; only the literal [`ADMIN_MARKER`] grants
//! the elevated tier and everything else resolves to [`Role::User`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The only stored role value that grants elevated access.
pub const ADMIN_MARKER: &str = "admin";

/// Stored role value for regular members.
pub const USER_MARKER: &str = "user";

/// Coarse authorization tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular member.
    #[default]
    User,
    /// Elevated tier with access to the administration subtree.
    Admin,
}

impl Role {
    /// Resolve a stored role value.
    ///
    /// Exact match against [`ADMIN_MARKER`]. Case variants, whitespace,
    /// empty strings and unknown tiers are all non-elevated.
    pub fn from_marker(value: &str) -> Self {
        if value == ADMIN_MARKER {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// Whether this role may see restricted navigation and admin routes.
    pub fn is_elevated(self) -> bool {
        match self {
            Role::Admin => true,
            Role::User => false,
        }
    }

    /// Stored/display marker.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ADMIN_MARKER,
            Role::User => USER_MARKER,
        }
    }

    /// Human-readable label for the account menu.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from_marker(&raw))
    }
}
