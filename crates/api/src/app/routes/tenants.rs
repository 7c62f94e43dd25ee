//! Tenant administration routes. Super admin only.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
};

use mandir_auth::{AccessContext, AccessError, Role};
use mandir_core::{EntityId, TenantId};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::gates::{self, RoleGate};

const TENANT_ADMINS: &[Role] = &[Role::SuperAdmin];

pub fn router() -> Router {
    Router::new()
        .route("/tenants/:id/overview", get(tenant_overview))
        .layer(axum::middleware::from_fn_with_state(
            RoleGate::allowing(TENANT_ADMINS),
            gates::role_gate,
        ))
}

/// Cross-temple rollup for one tenant.
///
/// The `:id` capture doubles as a tenant scope signal, so a super admin
/// hitting this route acts on the tenant's temple unless an explicit entity
/// signal overrode it. The response names the entity the counts were scoped
/// to.
pub async fn tenant_overview(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let tenant_id: TenantId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::access_denied(&AccessError::MalformedId(id)),
    };

    let entity_id = ctx
        .accessible_entity_id()
        .unwrap_or(EntityId::from(tenant_id));
    let scope = Some(entity_id);

    Json(serde_json::json!({
        "tenant_id": tenant_id,
        "entity_id": entity_id,
        "events": services.events.list(scope).len(),
        "sevas": services.sevas.list_sevas(scope).len(),
        "bookings": services.sevas.list_bookings(scope).len(),
    }))
    .into_response()
}
