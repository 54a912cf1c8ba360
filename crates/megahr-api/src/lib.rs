//! MegaHR RESTful API
//!
//! The HTTP surface of the recruiting platform: configuration, telemetry, the
//! error envelope, request extractors, security adapters and one handler module
//! per resource, all served by axum under `/api/v1`.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod oauth;
pub mod response;
pub mod routes;
pub mod security;
pub mod state;
pub mod telemetry;
pub mod uploads;

pub use config::{ApiConfig, ConfigError};
pub use routes::app;
pub use state::AppState;
