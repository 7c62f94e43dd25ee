//! Seva catalog and booking routes.
//!
//! Seva management is staff work, so the group's allow-list stops at
//! operational roles. The booking report alone is widened through
//! [`gates::SEVA_BOOKING_REPORT`]; the carve-out is named and pinned to one
//! route and method so it cannot quietly grow.

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

use crate::app::services::{AppServices, Seva, SevaBooking};
use crate::app::{dto, errors};
use crate::gates::{self, RoleGate};

const SEVA_MANAGERS: &[Role] = &[Role::SuperAdmin, Role::TempleAdmin, Role::StandardUser];

pub fn router() -> Router {
    Router::new()
        .route("/sevas", get(list_sevas).post(create_seva))
        .route("/sevas/bookings", get(list_bookings).post(book_seva))
        .layer(axum::middleware::from_fn(gates::require_temple_access))
        .layer(axum::middleware::from_fn_with_state(
            RoleGate::allowing(SEVA_MANAGERS).with_exceptions(&[gates::SEVA_BOOKING_REPORT]),
            gates::role_gate,
        ))
}

pub async fn list_sevas(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
) -> axum::response::Response {
    let scope = ctx.accessible_entity_id();
    let sevas: Vec<_> = services
        .sevas
        .list_sevas(scope)
        .iter()
        .map(dto::seva_to_json)
        .collect();

    Json(serde_json::json!({
        "entity_id": scope,
        "sevas": sevas,
    }))
    .into_response()
}

pub async fn create_seva(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
    Json(body): Json<dto::CreateSevaRequest>,
) -> axum::response::Response {
    if let Err(err) = gate::require_write_access(&ctx) {
        return errors::access_denied(&err);
    }

    let Some(entity_id) = ctx.accessible_entity_id() else {
        return errors::access_denied(&AccessError::EntityRequired(ctx.role()));
    };

    if body.name.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "name must not be empty",
        );
    }

    let seva = Seva {
        id: Uuid::now_v7(),
        entity_id,
        name: body.name,
        price: body.price,
    };
    services.sevas.add_seva(seva.clone());

    tracing::info!(user_id = %ctx.user_id(), entity = %entity_id, "seva created");
    (StatusCode::CREATED, Json(dto::seva_to_json(&seva))).into_response()
}

pub async fn list_bookings(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
) -> axum::response::Response {
    let scope = ctx.accessible_entity_id();
    let bookings: Vec<_> = services
        .sevas
        .list_bookings(scope)
        .iter()
        .map(dto::booking_to_json)
        .collect();

    Json(serde_json::json!({
        "entity_id": scope,
        "bookings": bookings,
    }))
    .into_response()
}

pub async fn book_seva(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccessContext>,
    Json(body): Json<dto::BookSevaRequest>,
) -> axum::response::Response {
    if let Err(err) = gate::require_write_access(&ctx) {
        return errors::access_denied(&err);
    }

    let Some(seva) = services.sevas.seva(body.seva_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "seva not found");
    };

    // A booking mutates the owning temple's data; ownership is checked
    // against the seva's entity, never a caller-supplied one.
    if let Err(err) = gate::require_entity(&ctx, seva.entity_id) {
        tracing::warn!(
            user_id = %ctx.user_id(),
            role = %ctx.role(),
            entity = %seva.entity_id,
            "cross-entity booking denied"
        );
        return errors::access_denied(&err);
    }

    let booking = SevaBooking {
        id: Uuid::now_v7(),
        seva_id: seva.id,
        entity_id: seva.entity_id,
        booked_by: ctx.user_id(),
        devotee_name: body.devotee_name,
        booked_at: Utc::now(),
    };
    services.sevas.add_booking(booking.clone());

    (StatusCode::CREATED, Json(dto::booking_to_json(&booking))).into_response()
}
