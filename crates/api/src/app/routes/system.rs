use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use mandir_auth::AccessContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo of the caller's resolved access context.
pub async fn whoami(Extension(ctx): Extension<AccessContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": ctx.user_id(),
        "role": ctx.role(),
        "permission": ctx.permission(),
        "tenant_id": ctx.tenant_id(),
        "direct_entity_id": ctx.direct_entity_id(),
        "assigned_entity_id": ctx.assigned_entity_id(),
        "accessible_entity_id": ctx.accessible_entity_id(),
    }))
}
