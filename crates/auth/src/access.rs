//! The per-request authorization descriptor.

use mandir_core::{EntityId, TenantId, UserId};

use crate::claims::AccessClaims;
use crate::resolve::RequestScope;
use crate::roles::{PermissionType, Role};
use crate::user::User;

/// Everything downstream code needs to authorize one request.
///
/// Built exactly once per request, after token verification and account
/// lookup, and read-only from then on. The single sanctioned mutation is
/// [`AccessContext::demoted_to_readonly`], which the entity gate applies to
/// devotional roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext {
    user_id: UserId,
    role: Role,
    direct_entity_id: Option<EntityId>,
    assigned_entity_id: Option<EntityId>,
    tenant_id: Option<TenantId>,
    permission: PermissionType,
}

impl AccessContext {
    /// Build the context for `user` out of verified claims and request scope.
    ///
    /// Entities the request named explicitly land in `assigned_entity_id`.
    /// Without an explicit signal, each role fills the field it is
    /// authoritative for: temple admins their home entity (direct),
    /// operational roles their assigned tenant (assigned), devotional roles
    /// their home entity (direct). Super admins stay global unless a tenant
    /// signal pins them. The billing tenant comes from claims alone; request
    /// signals never touch it.
    pub fn build(user: &User, claims: &AccessClaims, scope: &RequestScope) -> Self {
        let explicit = scope.explicit_entity();

        let (direct_entity_id, assigned_entity_id) = match user.role {
            Role::SuperAdmin => (
                None,
                explicit.or_else(|| scope.signal_tenant().map(EntityId::from)),
            ),
            Role::TempleAdmin => (user.home_entity_id, explicit),
            Role::StandardUser | Role::MonitoringUser => (
                None,
                explicit
                    .or_else(|| claims.assigned_tenant().map(EntityId::from))
                    .or(user.home_entity_id),
            ),
            Role::Devotee | Role::Volunteer => match explicit {
                Some(id) => (None, Some(id)),
                None => (user.home_entity_id, None),
            },
        };

        Self {
            user_id: user.id,
            role: user.role,
            direct_entity_id,
            assigned_entity_id,
            tenant_id: claims.tenant(),
            permission: user.role.default_permission(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Entity the account itself belongs to, when the role anchors one.
    pub fn direct_entity_id(&self) -> Option<EntityId> {
        self.direct_entity_id
    }

    /// Entity this request was scoped to, by signal or assignment.
    pub fn assigned_entity_id(&self) -> Option<EntityId> {
        self.assigned_entity_id
    }

    /// Billing tenant from the token claims.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn permission(&self) -> PermissionType {
        self.permission
    }

    /// The entity queries must be scoped to. Assignment wins over the
    /// account's own anchor when both are present; `None` means global.
    pub fn accessible_entity_id(&self) -> Option<EntityId> {
        self.assigned_entity_id.or(self.direct_entity_id)
    }

    pub fn can_write(&self) -> bool {
        self.permission == PermissionType::Full
    }

    /// Reads are never denied to an authenticated caller within scope.
    pub fn can_read(&self) -> bool {
        true
    }

    /// Whether this caller may touch `entity_id`'s data. Super admins may
    /// touch anything; everyone else only their accessible entity.
    pub fn can_access_entity(&self, entity_id: EntityId) -> bool {
        if self.role == Role::SuperAdmin {
            return true;
        }
        self.accessible_entity_id() == Some(entity_id)
    }

    /// Copy of this context with permission forced down to read-only.
    #[must_use]
    pub fn demoted_to_readonly(self) -> Self {
        Self {
            permission: PermissionType::ReadOnly,
            ..self
        }
    }
}
