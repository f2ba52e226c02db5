//! Bearer token authentication gate for axum.
//!
//! The decision engine lives in [`services::auth`]; [`middleware::auth::bearer`]
//! wires it into a router.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
