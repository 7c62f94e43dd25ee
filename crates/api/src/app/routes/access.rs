//! Decision introspection.
//!
//! `/access/explain` spells out the caller's resolved context and what each
//! gate would say, without performing any operation. Open to every
//! authenticated role; a caller can only ever explain itself.

use axum::{
    Json,
    extract::{Extension, Query},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use mandir_auth::{AccessContext, AccessError, gate};
use mandir_core::EntityId;

use crate::app::errors;

/// The probe parameter is named `entity`, not `entity_id`: the resolver reads
/// `entity_id` as a scope signal, and a probe must not change the decision it
/// asks about.
#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    entity: Option<String>,
}

pub async fn explain(
    Extension(ctx): Extension<AccessContext>,
    Query(query): Query<ExplainQuery>,
) -> axum::response::Response {
    let probe = match query.entity.as_deref() {
        Some(raw) => match raw.parse::<EntityId>() {
            Ok(id) => Some(json!({
                "entity_id": id,
                "allowed": ctx.can_access_entity(id),
            })),
            Err(_) => {
                return errors::access_denied(&AccessError::MalformedId(raw.to_string()));
            }
        },
        None => None,
    };

    let entity_gate = gate::require_entity_access(ctx);
    let write_gate = gate::require_write_access(&ctx);

    Json(json!({
        "user_id": ctx.user_id(),
        "role": ctx.role(),
        "permission": ctx.permission(),
        "tenant_id": ctx.tenant_id(),
        "direct_entity_id": ctx.direct_entity_id(),
        "assigned_entity_id": ctx.assigned_entity_id(),
        "accessible_entity_id": ctx.accessible_entity_id(),
        "checks": {
            "can_read": ctx.can_read(),
            "can_write": ctx.can_write(),
            "entity_gate": check_json(entity_gate.map(|_| ())),
            "write_gate": check_json(write_gate),
            "entity_probe": probe,
        },
    }))
    .into_response()
}

fn check_json(result: Result<(), AccessError>) -> Value {
    match result {
        Ok(()) => json!({ "granted": true, "denial": Value::Null }),
        Err(err) => json!({ "granted": false, "denial": err.code() }),
    }
}
