//! Temple event routes.
//!
//! `/entity/:id/events` is the same surface as `/events` addressed through an
//! explicit entity path; the resolver picks the path segment up as a scope
//! signal, so the handlers never look at the URL themselves.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use uuid::Uuid;

use mandir_auth::{AccessContext, AccessError, Role, gate};

use crate::app::services::{AppServices, TempleEvent};
use crate::app::{dto, errors};
use crate::gates::{self, RoleGate};

/// Every authenticated role may browse events; writes are permission-gated in
/// the handler.
const EVENT_AUDIENCE: &[Role] = &Role::ALL;

pub fn router() -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/entity/:id/events", get(list_events).post(create_event))
        .layer(axum::middleware::from_fn(gates::require_temple_access))
        .layer(axum::middleware::from_fn_with_state(
            RoleGate::allowing(EVENT_AUDIENCE),
            gates::role_gate,
        ))
}

pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
) -> axum::response::Response {
    let scope = ctx.accessible_entity_id();
    let events: Vec<_> = services
        .events
        .list(scope)
        .iter()
        .map(dto::event_to_json)
        .collect();

    Json(serde_json::json!({
        "entity_id": scope,
        "events": events,
    }))
    .into_response()
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
    Json(body): Json<dto::CreateEventRequest>,
) -> axum::response::Response {
    if let Err(err) = gate::require_write_access(&ctx) {
        return errors::access_denied(&err);
    }

    // Events belong to one temple; a global super admin has to name it
    // through a scope signal.
    let Some(entity_id) = ctx.accessible_entity_id() else {
        return errors::access_denied(&AccessError::EntityRequired(ctx.role()));
    };

    if body.title.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "title must not be empty",
        );
    }

    let event = TempleEvent {
        id: Uuid::now_v7(),
        entity_id,
        title: body.title,
        starts_at: body.starts_at.unwrap_or_else(Utc::now),
        created_by: ctx.user_id(),
    };
    services.events.add(event.clone());

    tracing::info!(user_id = %ctx.user_id(), entity = %entity_id, "event created");
    (StatusCode::CREATED, Json(dto::event_to_json(&event))).into_response()
}
