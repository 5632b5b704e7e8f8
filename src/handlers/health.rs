//! Health check endpoint handler.
//!
//! This module provides the `/health` endpoint handler that reports
//! whether the backing Elasticsearch cluster is reachable.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Handler for the /health endpoint.
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing /health request");

    let uptime_secs = state.start_time.elapsed().as_secs();

    if state.es.ping().await {
        (
            StatusCode::OK,
            format!("OK - Elasticsearch reachable (uptime: {}s)\n", uptime_secs),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!(
                "Elasticsearch unreachable at {} (uptime: {}s)\n",
                state
                    .config
                    .elasticsearch_url
                    .as_deref()
                    .unwrap_or("unknown"),
                uptime_secs
            ),
        )
    }
}
