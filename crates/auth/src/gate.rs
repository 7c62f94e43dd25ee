//! Authorization gates applied between context construction and handlers.
//!
//! Gates are pure and synchronous. They take the already-built context and
//! either pass it through (possibly demoted) or fail closed with a typed
//! denial; no gate performs I/O.

use mandir_core::EntityId;

use crate::access::AccessContext;
use crate::error::AccessError;
use crate::roles::{PermissionType, Role};

/// Per-role entity requirement.
///
/// Temple admins must be anchored to their own temple; operational and
/// devotional roles need some resolved entity; super admins may stay global.
/// Devotional contexts come back demoted to read-only whatever they arrived
/// with.
pub fn require_entity_access(ctx: AccessContext) -> Result<AccessContext, AccessError> {
    match ctx.role() {
        Role::SuperAdmin => Ok(ctx),
        Role::TempleAdmin => {
            if ctx.direct_entity_id().is_some() {
                Ok(ctx)
            } else {
                Err(AccessError::EntityRequired(ctx.role()))
            }
        }
        Role::StandardUser | Role::MonitoringUser => {
            if ctx.accessible_entity_id().is_some() {
                Ok(ctx)
            } else {
                Err(AccessError::EntityRequired(ctx.role()))
            }
        }
        Role::Devotee | Role::Volunteer => {
            if ctx.accessible_entity_id().is_some() {
                Ok(ctx.demoted_to_readonly())
            } else {
                Err(AccessError::EntityRequired(ctx.role()))
            }
        }
    }
}

/// Write gate. Admin roles always pass; everyone else needs full permission
/// on the context they arrived with.
pub fn require_write_access(ctx: &AccessContext) -> Result<(), AccessError> {
    match ctx.role() {
        Role::SuperAdmin | Role::TempleAdmin => Ok(()),
        Role::StandardUser | Role::MonitoringUser | Role::Devotee | Role::Volunteer => {
            if ctx.permission() == PermissionType::Full {
                Ok(())
            } else {
                Err(AccessError::WriteDenied(ctx.role()))
            }
        }
    }
}

/// Ownership gate for operations that touch one entity's data.
pub fn require_entity(ctx: &AccessContext, entity_id: EntityId) -> Result<(), AccessError> {
    if ctx.can_access_entity(entity_id) {
        Ok(())
    } else {
        Err(AccessError::EntityForbidden(entity_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use mandir_core::UserId;

    use super::*;
    use crate::claims::AccessClaims;
    use crate::resolve::RequestScope;
    use crate::user::User;

    fn context(role: Role, home: Option<u64>, assigned_claim: Option<u64>) -> AccessContext {
        let now = Utc::now();
        let user = User::new(
            UserId::from_raw(1).unwrap(),
            role,
            home.and_then(EntityId::from_raw),
        );
        let claims = AccessClaims {
            sub: user.id,
            tenant_id: None,
            assigned_tenant_id: assigned_claim,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        };
        AccessContext::build(&user, &claims, &RequestScope::default())
    }

    fn context_with_scope(role: Role, home: Option<u64>, scope: &RequestScope) -> AccessContext {
        let now = Utc::now();
        let user = User::new(
            UserId::from_raw(1).unwrap(),
            role,
            home.and_then(EntityId::from_raw),
        );
        let claims = AccessClaims {
            sub: user.id,
            tenant_id: None,
            assigned_tenant_id: None,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        };
        AccessContext::build(&user, &claims, scope)
    }

    #[test]
    fn super_admin_passes_without_any_entity() {
        assert!(require_entity_access(context(Role::SuperAdmin, None, None)).is_ok());
    }

    #[test]
    fn temple_admin_needs_a_direct_anchor() {
        assert!(require_entity_access(context(Role::TempleAdmin, Some(7), None)).is_ok());
        assert_eq!(
            require_entity_access(context(Role::TempleAdmin, None, None)),
            Err(AccessError::EntityRequired(Role::TempleAdmin))
        );
    }

    #[test]
    fn temple_admin_assigned_scope_does_not_replace_the_anchor() {
        // An unanchored temple admin is misprovisioned; a request-scoped
        // entity must not paper over that.
        let scope = RequestScope {
            entity_header: Some("5".into()),
            ..RequestScope::default()
        };
        let ctx = context_with_scope(Role::TempleAdmin, None, &scope);
        assert_eq!(ctx.assigned_entity_id(), EntityId::from_raw(5));
        assert_eq!(
            require_entity_access(ctx),
            Err(AccessError::EntityRequired(Role::TempleAdmin))
        );
    }

    #[test]
    fn operational_roles_need_some_entity() {
        for role in [Role::StandardUser, Role::MonitoringUser] {
            assert!(require_entity_access(context(role, None, Some(42))).is_ok());
            assert_eq!(
                require_entity_access(context(role, None, None)),
                Err(AccessError::EntityRequired(role)),
                "role {role}"
            );
        }
    }

    #[test]
    fn devotional_roles_come_back_read_only() {
        for role in [Role::Devotee, Role::Volunteer] {
            let passed = require_entity_access(context(role, Some(3), None)).unwrap();
            assert_eq!(passed.permission(), PermissionType::ReadOnly);
            assert!(!passed.can_write());

            assert_eq!(
                require_entity_access(context(role, None, None)),
                Err(AccessError::EntityRequired(role)),
                "role {role}"
            );
        }
    }

    #[test]
    fn write_gate_follows_permission_for_non_admins() {
        assert!(require_write_access(&context(Role::SuperAdmin, None, None)).is_ok());
        assert!(require_write_access(&context(Role::TempleAdmin, Some(7), None)).is_ok());
        assert!(require_write_access(&context(Role::StandardUser, None, Some(4))).is_ok());

        assert_eq!(
            require_write_access(&context(Role::MonitoringUser, None, Some(4))),
            Err(AccessError::WriteDenied(Role::MonitoringUser))
        );
        assert_eq!(
            require_write_access(&context(Role::Devotee, Some(3), None)),
            Err(AccessError::WriteDenied(Role::Devotee))
        );
    }

    #[test]
    fn entity_gate_checks_ownership() {
        let ctx = context(Role::StandardUser, None, Some(4));
        assert!(require_entity(&ctx, EntityId::from_raw(4).unwrap()).is_ok());
        assert_eq!(
            require_entity(&ctx, EntityId::from_raw(5).unwrap()),
            Err(AccessError::EntityForbidden(EntityId::from_raw(5).unwrap()))
        );

        let admin = context(Role::SuperAdmin, None, None);
        assert!(require_entity(&admin, EntityId::from_raw(5).unwrap()).is_ok());
    }
}
