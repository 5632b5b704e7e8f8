//! One full collection-and-render cycle.

use crate::catalog::Catalog;
use crate::collector::Collector;
use crate::error::ExportError;
use crate::exposition::{negotiate, ContentType};
use crate::filters::ExportFilters;
use crate::stats::{ClusterHealth, ClusterStatsData, IndicesStats, NodeStats};

/// The negotiated content type and the rendered exposition document.
#[derive(Debug, Clone)]
pub struct ScrapeOutput {
    pub content_type: ContentType,
    pub body: String,
}

/// Runs one scrape: builds a fresh catalog scoped to this request,
/// registers the full metric surface, collects from the four aggregates,
/// and renders in the negotiated content type.
///
/// The caller is responsible for having obtained the aggregates; a
/// failure to do so is its `SourceUnavailable` error and no document is
/// produced. Everything past that point only fails on collector
/// programming errors.
pub fn handle_scrape(
    accept: Option<&str>,
    cluster_health: &ClusterHealth,
    node_stats: &NodeStats,
    indices_stats: &IndicesStats,
    cluster_stats: &ClusterStatsData,
    filters: &ExportFilters,
    prefix: &str,
) -> Result<ScrapeOutput, ExportError> {
    let content_type = negotiate(accept);

    let node_name = node_stats.name.as_deref().unwrap_or_default();
    let mut catalog = Catalog::new(
        &cluster_health.cluster_name,
        node_name,
        &node_stats.id,
        prefix,
    );

    {
        let mut collector = Collector::new(&mut catalog, &filters.indices, &filters.settings);
        collector.register_metrics()?;
        collector.collect(cluster_health, node_stats, indices_stats, cluster_stats)?;
    }

    Ok(ScrapeOutput {
        content_type,
        body: catalog.render(content_type),
    })
}
