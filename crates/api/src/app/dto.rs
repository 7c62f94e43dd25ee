//! Request DTOs and JSON mapping helpers.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::app::services::{Seva, SevaBooking, TempleEvent};

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    /// Defaults to "now" when omitted.
    pub starts_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSevaRequest {
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct BookSevaRequest {
    pub seva_id: Uuid,
    /// Walk-in devotee the booking is made for, when staff books on behalf.
    pub devotee_name: Option<String>,
}

pub fn event_to_json(event: &TempleEvent) -> Value {
    json!({
        "id": event.id.to_string(),
        "entity_id": event.entity_id,
        "title": event.title,
        "starts_at": event.starts_at,
        "created_by": event.created_by,
    })
}

pub fn seva_to_json(seva: &Seva) -> Value {
    json!({
        "id": seva.id.to_string(),
        "entity_id": seva.entity_id,
        "name": seva.name,
        "price": seva.price,
    })
}

pub fn booking_to_json(booking: &SevaBooking) -> Value {
    json!({
        "id": booking.id.to_string(),
        "seva_id": booking.seva_id.to_string(),
        "entity_id": booking.entity_id,
        "booked_by": booking.booked_by,
        "devotee_name": booking.devotee_name,
        "booked_at": booking.booked_at,
    })
}
