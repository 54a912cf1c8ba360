//! Request logging middleware

use std::time::{Duration, Instant};

use axum::{extract::State, http::Request, middleware::Next, response::Response};

use crate::state::AppState;

/// Logs method, URI, status and latency; slow requests are warned about
pub async fn logging_middleware(
    State(state): State<AppState>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    if elapsed > Duration::from_millis(state.config.slow_request_ms) {
        tracing::warn!(%method, %uri, elapsed_ms = elapsed.as_millis() as u64, "slow request");
    }

    tracing::info!(
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request completed"
    );

    response
}
