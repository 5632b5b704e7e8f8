//! Cluster-wide aggregate statistics (`GET /_cluster/stats`), plus the
//! flat cluster settings document the client folds in.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::common::{
    CompletionStats, DocsStats, FielddataStats, QueryCacheStats, SegmentsStats, StoreStats,
};
use super::node_stats::FsEntry;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterStatsData {
    pub cluster_name: Option<String>,
    pub status: Option<String>,
    pub indices: Option<ClusterIndicesStats>,
    pub nodes: Option<ClusterNodesStats>,
    /// Flat cluster settings (`key -> value`), folded in from
    /// `/_cluster/settings?flat_settings=true` by the stats source. Not
    /// part of the `/_cluster/stats` body itself.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterIndicesStats {
    pub count: Option<u64>,
    pub shards: Option<ClusterShardsStats>,
    pub docs: Option<DocsStats>,
    pub store: Option<StoreStats>,
    pub fielddata: Option<FielddataStats>,
    pub query_cache: Option<QueryCacheStats>,
    pub completion: Option<CompletionStats>,
    pub segments: Option<SegmentsStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterShardsStats {
    pub total: Option<u64>,
    pub primaries: Option<u64>,
    pub replication: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterNodesStats {
    pub count: Option<ClusterNodeCounts>,
    pub jvm: Option<ClusterJvmStats>,
    pub fs: Option<FsEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterNodeCounts {
    pub total: Option<u64>,
    pub data: Option<u64>,
    pub master: Option<u64>,
    pub ingest: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterJvmStats {
    pub threads: Option<u64>,
    pub mem: Option<ClusterJvmMemStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterJvmMemStats {
    pub heap_used_in_bytes: Option<u64>,
    pub heap_max_in_bytes: Option<u64>,
}
