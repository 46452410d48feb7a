//! # HTTP Server Module
//!
//! Axum transport over `InferenceService`.
//!
//! # Endpoints
//!
//! - `GET /health`, `GET /metrics`
//! - `POST /inference/start`, `POST /inference/answer`
//! - `GET|DELETE /inference/sessions/:session_id`
//! - `POST /automaton/walk`

pub mod config;
pub mod inference_routes;
pub mod observability_routes;
pub mod server;

pub use config::{HttpConfigError, HttpServerConfig};
pub use server::HttpServer;
