//! Health check and fallback handlers

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{error::ApiError, state::AppState};

/// Liveness probe; answered outside the envelope
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "UP",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.uptime_seconds(),
    }))
}

pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Not Found - {} {}", method, uri.path()))
}
