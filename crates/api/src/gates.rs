//! Route-level authorization middleware.
//!
//! Two gates run between the access middleware and the handlers. The role
//! gate checks the caller's role against the route group's allow-list; the
//! temple gate enforces the per-role entity requirement and hands devotional
//! callers a read-only context. Both fail closed when the access middleware
//! did not run.

use axum::{
    extract::{MatchedPath, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use mandir_auth::{AccessContext, AccessError, Role, gate};

use crate::app::errors;

/// A named, deliberately narrow carve-out from a role allow-list.
///
/// Exceptions admit extra roles on exactly one route and method. They are
/// declared as consts next to the route group they belong to, so widening one
/// is a reviewable change to a single line, not a policy rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateException {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub roles: &'static [Role],
}

impl GateException {
    fn admits(&self, role: Role, method: &Method, route: Option<&str>) -> bool {
        route == Some(self.path) && *method == self.method && self.roles.contains(&role)
    }
}

/// Operational and monitoring staff may read the seva booking report even
/// though seva management is closed to them. Applies to the report route
/// only; booking creation stays with the managing roles.
pub const SEVA_BOOKING_REPORT: GateException = GateException {
    name: "seva_booking_report",
    method: Method::GET,
    path: "/sevas/bookings",
    roles: &[Role::StandardUser, Role::MonitoringUser],
};

/// Role allow-list for one route group.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [Role],
    exceptions: &'static [GateException],
}

impl RoleGate {
    pub const fn allowing(allowed: &'static [Role]) -> Self {
        Self {
            allowed,
            exceptions: &[],
        }
    }

    pub const fn with_exceptions(mut self, exceptions: &'static [GateException]) -> Self {
        self.exceptions = exceptions;
        self
    }

    fn admits(&self, role: Role, method: &Method, route: Option<&str>) -> bool {
        self.allowed.contains(&role)
            || self
                .exceptions
                .iter()
                .any(|exception| exception.admits(role, method, route))
    }
}

/// Reject callers whose role is not on the group's allow-list.
pub async fn role_gate(
    State(roles): State<RoleGate>,
    matched: Option<MatchedPath>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(ctx) = req.extensions().get::<AccessContext>().copied() else {
        return missing_context(req.uri().path());
    };

    let route = matched.as_ref().map(MatchedPath::as_str);
    if !roles.admits(ctx.role(), req.method(), route) {
        tracing::warn!(
            user_id = %ctx.user_id(),
            role = %ctx.role(),
            path = req.uri().path(),
            "role not allowed on this route"
        );
        return errors::access_denied(&AccessError::RoleNotAllowed(ctx.role()));
    }

    next.run(req).await
}

/// Enforce the per-role entity requirement for temple-scoped route groups.
///
/// The context is re-inserted on success because the gate may hand back a
/// demoted copy: devotional roles pass through here read-only.
pub async fn require_temple_access(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(ctx) = req.extensions().get::<AccessContext>().copied() else {
        return missing_context(req.uri().path());
    };

    match gate::require_entity_access(ctx) {
        Ok(passed) => {
            req.extensions_mut().insert(passed);
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(
                user_id = %ctx.user_id(),
                role = %ctx.role(),
                path = req.uri().path(),
                "entity scope required"
            );
            errors::access_denied(&err)
        }
    }
}

fn missing_context(path: &str) -> Response {
    tracing::error!(path, "route gated without access middleware");
    errors::json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "missing_access_context",
        "access context missing from request",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAFF: &[Role] = &[Role::SuperAdmin, Role::TempleAdmin, Role::StandardUser];

    #[test]
    fn allow_list_admits_listed_roles_only() {
        let gate = RoleGate::allowing(STAFF);
        assert!(gate.admits(Role::TempleAdmin, &Method::GET, Some("/sevas")));
        assert!(!gate.admits(Role::Devotee, &Method::GET, Some("/sevas")));
        assert!(!gate.admits(Role::MonitoringUser, &Method::GET, Some("/sevas")));
    }

    #[test]
    fn exception_admits_only_its_route_and_method() {
        let gate = RoleGate::allowing(STAFF).with_exceptions(&[SEVA_BOOKING_REPORT]);

        assert!(gate.admits(Role::MonitoringUser, &Method::GET, Some("/sevas/bookings")));
        assert!(gate.admits(Role::StandardUser, &Method::GET, Some("/sevas/bookings")));

        // Same route, wrong method; wrong route; role outside the exception.
        assert!(!gate.admits(Role::MonitoringUser, &Method::POST, Some("/sevas/bookings")));
        assert!(!gate.admits(Role::MonitoringUser, &Method::GET, Some("/sevas")));
        assert!(!gate.admits(Role::Devotee, &Method::GET, Some("/sevas/bookings")));
    }

    #[test]
    fn exception_never_blocks_the_base_list() {
        let gate = RoleGate::allowing(STAFF).with_exceptions(&[SEVA_BOOKING_REPORT]);
        assert!(gate.admits(Role::TempleAdmin, &Method::POST, Some("/sevas/bookings")));
    }

    #[test]
    fn unmatched_route_falls_back_to_the_allow_list() {
        let gate = RoleGate::allowing(STAFF).with_exceptions(&[SEVA_BOOKING_REPORT]);
        assert!(!gate.admits(Role::MonitoringUser, &Method::GET, None));
        assert!(gate.admits(Role::SuperAdmin, &Method::GET, None));
    }
}
