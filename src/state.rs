//! Application state management for the exporter.
//!
//! This module defines the shared application state that is passed to
//! HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use es_prometheus_exporter::ExportFilters;

use crate::client::EsClient;
use crate::config::Config;

/// Type alias for shared application state.
pub type SharedState = Arc<AppState>;

/// Global application state shared across requests.
pub struct AppState {
    pub config: Arc<Config>,
    /// Elasticsearch stats source.
    pub es: EsClient,
    /// Compiled export filters. A configuration reload replaces the whole
    /// value; handlers clone a snapshot once per scrape so a reload cannot
    /// partially apply within one document.
    pub filters: RwLock<ExportFilters>,
    /// Metric name prefix, fixed at startup.
    pub metric_prefix: String,
    /// Server start time for uptime display.
    pub start_time: Instant,
}

impl AppState {
    /// Consistent filter snapshot for one scrape.
    pub async fn filters_snapshot(&self) -> ExportFilters {
        self.filters.read().await.clone()
    }
}
