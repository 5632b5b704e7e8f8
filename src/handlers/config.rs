//! Configuration display endpoint handler.
//!
//! This module provides the `/config` endpoint handler that returns the
//! effective runtime configuration as YAML.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Handler for the /config endpoint.
#[instrument(skip(state))]
pub async fn config_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing /config request");

    match serde_yaml::to_string(state.config.as_ref()) {
        Ok(yaml) => (StatusCode::OK, yaml).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render configuration: {}\n", e),
        )
            .into_response(),
    }
}
