use axum::{Router, routing::get};

pub mod access;
pub mod events;
pub mod sevas;
pub mod system;
pub mod tenants;

/// Router for all authenticated endpoints.
///
/// Route groups carry their own gates, so they are merged flat instead of
/// nested: the gates match on full route paths, and path captures stay
/// visible to the access middleware wrapped around the whole thing.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/access/explain", get(access::explain))
        .merge(events::router())
        .merge(sevas::router())
        .merge(tenants::router())
}
