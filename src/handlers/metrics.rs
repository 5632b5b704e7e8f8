//! Metrics endpoint handler for Prometheus scraping.
//!
//! One scrape fetches the four statistics aggregates from Elasticsearch,
//! runs the collection-and-render cycle against a fresh catalog, and
//! returns the document in the negotiated content type.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{debug, error, instrument};

use es_prometheus_exporter::{handle_scrape, ExportError};

use crate::state::SharedState;

/// Handler for the /metrics endpoint.
#[instrument(skip(state, headers))]
pub async fn metrics_handler(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    debug!("Processing /metrics request");

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    debug!("Request accept header: {}", accept.unwrap_or("NONE"));

    // Snapshot the filters once so a concurrent configuration reload
    // cannot partially apply within this document.
    let filters = state.filters_snapshot().await;

    let aggregates = tokio::try_join!(
        state.es.cluster_health(),
        state.es.local_node_stats(),
        state.es.indices_stats(),
        state.es.cluster_stats(),
    );

    let (cluster_health, node_stats, indices_stats, cluster_stats) = match aggregates {
        Ok(aggregates) => aggregates,
        Err(e) => {
            error!("Failed to obtain statistics aggregates: {}", e);
            return (StatusCode::BAD_GATEWAY, format!("{}\n", e)).into_response();
        }
    };

    match handle_scrape(
        accept,
        &cluster_health,
        &node_stats,
        &indices_stats,
        &cluster_stats,
        &filters,
        &state.metric_prefix,
    ) {
        Ok(output) => {
            debug!(
                "Metrics request completed: {} bytes, {:.3}ms",
                output.body.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            (
                [(header::CONTENT_TYPE, output.content_type.as_str())],
                output.body,
            )
                .into_response()
        }
        Err(e @ ExportError::SourceUnavailable { .. }) => {
            error!("Scrape failed: {}", e);
            (StatusCode::BAD_GATEWAY, format!("{}\n", e)).into_response()
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", e)).into_response()
        }
    }
}
