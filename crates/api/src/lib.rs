//! HTTP API: access middleware, route gates, and handler wiring.

pub mod app;
pub mod gates;
pub mod middleware;
