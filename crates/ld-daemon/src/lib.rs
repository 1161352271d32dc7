//! HTTP boundary for the Lead Desk pipeline: configuration, app state, the
//! axum router, and the server loop.

pub mod config;
pub mod routes;
pub mod server;
pub mod state;
