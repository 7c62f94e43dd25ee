//! Entity and tenant resolution from competing request signals.
//!
//! A request can name its target entity in several places at once. Resolution
//! applies one total priority order so two signals can never fight: the
//! entity header wins, then an `/entity/{id}/…` path segment, then the
//! `entity_id` query parameter, and only then a role-specific fallback
//! derived from server-held state. Unusable signals (empty, the `"all"`
//! sentinel, zero, junk) are skipped, never errors: resolution falls through
//! to the next source and ultimately to `None`.

use std::str::FromStr;

use mandir_core::{EntityId, TenantId};

use crate::claims::AccessClaims;
use crate::roles::Role;
use crate::user::User;

/// Request value meaning "no specific entity, give me the global view".
pub const SCOPE_ALL: &str = "all";

/// Name of the entity override header.
pub const ENTITY_HEADER: &str = "x-entity-id";

/// Name of the tenant override header.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Per-request scope signals, already plucked out of the transport.
///
/// Values are carried exactly as received. Whether a value is usable is
/// decided here, in one place, so every caller applies the same rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestScope {
    /// `X-Entity-ID` header value.
    pub entity_header: Option<String>,
    /// `X-Tenant-ID` header value.
    pub tenant_header: Option<String>,
    /// Request path, scanned for a literal `entity` segment followed by an id.
    pub path: String,
    /// Router-captured `id` path parameter, on routes that have one.
    pub path_id: Option<String>,
    /// `entity_id` query parameter value.
    pub entity_query: Option<String>,
    /// `tenant_id` query parameter value.
    pub tenant_query: Option<String>,
}

impl RequestScope {
    /// Entity named explicitly by the request: header, then path, then query.
    pub fn explicit_entity(&self) -> Option<EntityId> {
        parse_signal(self.entity_header.as_deref())
            .or_else(|| parse_signal(self.path_entity()))
            .or_else(|| parse_signal(self.entity_query.as_deref()))
    }

    /// Tenant named by the request: path id, then query, then header.
    pub fn signal_tenant(&self) -> Option<TenantId> {
        parse_signal(self.path_id.as_deref())
            .or_else(|| parse_signal(self.tenant_query.as_deref()))
            .or_else(|| parse_signal(self.tenant_header.as_deref()))
    }

    /// The segment following a literal `entity` path segment, if any.
    fn path_entity(&self) -> Option<&str> {
        let mut segments = self.path.split('/').filter(|s| !s.is_empty());
        while let Some(segment) = segments.next() {
            if segment == "entity" {
                return segments.next();
            }
        }
        None
    }
}

/// One usable id out of a raw signal value.
///
/// Usable means: present, non-empty after trimming, not the `"all"` sentinel,
/// and a positive integer. Everything else reads as "this source did not
/// speak".
fn parse_signal<T: FromStr>(raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == SCOPE_ALL {
        return None;
    }
    raw.parse().ok()
}

/// Resolve the entity this request acts as.
///
/// Explicit signals win for every role. Past that, fallbacks use only
/// server-held state: the caller's account record and verified claims. A
/// `None` result is legitimate for super admins (global view); gates decide
/// whether other roles may proceed without an entity.
pub fn acting_entity(scope: &RequestScope, claims: &AccessClaims, user: &User) -> Option<EntityId> {
    if let Some(explicit) = scope.explicit_entity() {
        return Some(explicit);
    }

    match user.role {
        // A tenant-scoped request pins the super admin to that tenant's
        // entity; otherwise they stay global.
        Role::SuperAdmin => scope.signal_tenant().map(EntityId::from),
        Role::TempleAdmin => user.home_entity_id,
        Role::StandardUser | Role::MonitoringUser => claims
            .assigned_tenant()
            .map(EntityId::from)
            .or(user.home_entity_id),
        Role::Devotee | Role::Volunteer => user.home_entity_id,
    }
}
