//! HTTP API application wiring (Axum router + service wiring).
//!
//! The folder is structured like:
//! - `services.rs`: account store and the in-memory domain directories
//! - `routes/`: HTTP routes + handlers (one file per surface area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses
//!
//! Everything merged into the protected router sees exactly one
//! [`mandir_auth::AccessContext`] in its request extensions, built fresh per
//! request by the access middleware.

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use mandir_auth::{Hs256TokenVerifier, User};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: String, seed_users: Vec<User>) -> Router {
    let services = Arc::new(services::build_services(seed_users));
    let access_state = middleware::AccessState {
        verifier: Arc::new(Hs256TokenVerifier::new(jwt_secret.into_bytes())),
        users: services.users.clone(),
    };

    // Protected routes: authentication and context construction happen before
    // the per-group gates layered inside routes::router().
    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                access_state,
                middleware::access_middleware,
            ))
            .layer(Extension(services)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
