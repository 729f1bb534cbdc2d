//! JWT authentication gateway.
//!
//! Requests under `/api/v1` pass through the JWT pipeline
//! (`services::auth::Authenticator`) before reaching a handler.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
