//! HTTP layer of the ShareIt server.
//!
//! Thin actix-web handlers over the core services: DTO mapping, request
//! validation and error-to-status translation live here, business rules
//! stay in `si_core`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
