//! Account records and the lookup seam behind context construction.

use mandir_core::{EntityId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::Role;

/// Identity record of an account.
///
/// Loaded fresh on every request; the access layer never mutates it, so role
/// or entity changes take effect on the next request without token churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    /// Entity the account was created under, when any. Temple admins,
    /// devotees and volunteers are anchored here.
    pub home_entity_id: Option<EntityId>,
}

impl User {
    pub fn new(id: UserId, role: Role, home_entity_id: Option<EntityId>) -> Self {
        Self {
            id,
            role,
            home_entity_id,
        }
    }
}

/// Storage failure during account lookup. Unknown accounts are not an error
/// here; they come back as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Point lookup of accounts by token subject.
///
/// Implementations answer `Ok(None)` for subjects that no longer exist, e.g.
/// accounts deleted after the token was issued. Callers reject the request
/// in that case.
pub trait UserStore: Send + Sync {
    fn find(&self, id: UserId) -> Result<Option<User>, StoreError>;
}
