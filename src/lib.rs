//! Elasticsearch Prometheus exporter library.
//!
//! This library turns the heterogeneous Elasticsearch statistics
//! aggregates (cluster health, local node stats, per-index stats,
//! cluster-wide stats) into one Prometheus exposition document. The
//! pieces are deliberately small and per-request:
//!
//! - **Catalog**: metric definitions and samples for one scrape, with
//!   deterministic, registration-ordered rendering
//! - **Collector**: the statistic-to-metric mapping tables
//! - **Exposition**: content-type negotiation (text format / OpenMetrics)
//! - **Filters**: which indices and cluster settings get exported
//!
//! # Usage
//!
//! ```rust
//! use es_prometheus_exporter::{handle_scrape, ExportFilters};
//! use es_prometheus_exporter::stats::{
//!     ClusterHealth, ClusterStatsData, IndicesStats, NodeStats,
//! };
//!
//! let filters = ExportFilters::from_patterns::<&str>(&[], &[]).unwrap();
//! let output = handle_scrape(
//!     None,
//!     &ClusterHealth::default(),
//!     &NodeStats::default(),
//!     &IndicesStats::default(),
//!     &ClusterStatsData::default(),
//!     &filters,
//!     "es_",
//! )
//! .unwrap();
//! assert_eq!(output.content_type.as_str(), "text/plain; version=0.0.4; charset=utf-8");
//! ```

pub mod catalog;
pub mod collector;
pub mod error;
pub mod exposition;
pub mod filters;
pub mod scrape;
pub mod stats;

// Re-export main types for convenience
pub use catalog::{Catalog, MetricType};
pub use collector::Collector;
pub use error::{CatalogError, ExportError};
pub use exposition::{negotiate, ContentType};
pub use filters::{ExportFilters, IndexFilter, PatternFilter, SettingsFilter};
pub use scrape::{handle_scrape, ScrapeOutput};

/// Default metric name prefix.
pub const DEFAULT_METRIC_PREFIX: &str = "es_";
