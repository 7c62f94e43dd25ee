//! Role and permission model.
//!
//! Roles are a closed set fixed at account creation. Decision sites match on
//! `Role` exhaustively, so introducing a new variant fails compilation until
//! every builder and gate has been taught what the role means.

use std::fmt;
use std::str::FromStr;

use mandir_core::DomainError;
use serde::{Deserialize, Serialize};

/// Role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator. Global reach, every check passes.
    SuperAdmin,
    /// Administrator of exactly one temple, anchored to it at creation.
    TempleAdmin,
    /// Operational staff working a single assigned tenant.
    StandardUser,
    /// Dashboard/reporting account for a single assigned tenant.
    MonitoringUser,
    /// Self-registered worshipper.
    Devotee,
    /// Temple volunteer.
    Volunteer,
}

impl Role {
    /// Every role, in declaration order. Used to build allow-lists and to
    /// sweep role-dependent behavior in tests.
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::TempleAdmin,
        Role::StandardUser,
        Role::MonitoringUser,
        Role::Devotee,
        Role::Volunteer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::TempleAdmin => "temple_admin",
            Role::StandardUser => "standard_user",
            Role::MonitoringUser => "monitoring_user",
            Role::Devotee => "devotee",
            Role::Volunteer => "volunteer",
        }
    }

    /// Permission level a freshly built access context starts with.
    pub fn default_permission(&self) -> PermissionType {
        match self {
            Role::SuperAdmin | Role::TempleAdmin | Role::StandardUser => PermissionType::Full,
            Role::MonitoringUser | Role::Devotee | Role::Volunteer => PermissionType::ReadOnly,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "temple_admin" => Ok(Role::TempleAdmin),
            "standard_user" => Ok(Role::StandardUser),
            "monitoring_user" => Ok(Role::MonitoringUser),
            "devotee" => Ok(Role::Devotee),
            "volunteer" => Ok(Role::Volunteer),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Permission level carried by an access context.
///
/// There is no deny level: a context only exists for authenticated callers,
/// and every authenticated caller may read within their scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    /// Read and write.
    Full,
    /// Read only.
    ReadOnly,
}

impl PermissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Full => "full",
            PermissionType::ReadOnly => "readonly",
        }
    }
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
