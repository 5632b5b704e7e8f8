//! Statistic groups shared between the node-level indices section, the
//! per-index stats, and the cluster-wide aggregate.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocsStats {
    pub count: Option<u64>,
    pub deleted: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreStats {
    pub size_in_bytes: Option<u64>,
    pub reserved_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexingStats {
    pub index_total: Option<u64>,
    pub index_time_in_millis: Option<u64>,
    pub index_current: Option<u64>,
    pub index_failed: Option<u64>,
    pub delete_total: Option<u64>,
    pub delete_time_in_millis: Option<u64>,
    pub delete_current: Option<u64>,
    pub noop_update_total: Option<u64>,
    pub is_throttled: Option<bool>,
    pub throttle_time_in_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetStats {
    pub total: Option<u64>,
    pub time_in_millis: Option<u64>,
    pub exists_total: Option<u64>,
    pub exists_time_in_millis: Option<u64>,
    pub missing_total: Option<u64>,
    pub missing_time_in_millis: Option<u64>,
    pub current: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchStats {
    pub open_contexts: Option<u64>,
    pub query_total: Option<u64>,
    pub query_time_in_millis: Option<u64>,
    pub query_current: Option<u64>,
    pub fetch_total: Option<u64>,
    pub fetch_time_in_millis: Option<u64>,
    pub fetch_current: Option<u64>,
    pub scroll_total: Option<u64>,
    pub scroll_time_in_millis: Option<u64>,
    pub scroll_current: Option<u64>,
    pub suggest_total: Option<u64>,
    pub suggest_time_in_millis: Option<u64>,
    pub suggest_current: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergesStats {
    pub current: Option<u64>,
    pub current_docs: Option<u64>,
    pub current_size_in_bytes: Option<u64>,
    pub total: Option<u64>,
    pub total_time_in_millis: Option<u64>,
    pub total_docs: Option<u64>,
    pub total_size_in_bytes: Option<u64>,
    pub total_stopped_time_in_millis: Option<u64>,
    pub total_throttled_time_in_millis: Option<u64>,
    pub total_auto_throttle_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshStats {
    pub total: Option<u64>,
    pub total_time_in_millis: Option<u64>,
    pub listeners: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlushStats {
    pub total: Option<u64>,
    pub periodic: Option<u64>,
    pub total_time_in_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarmerStats {
    pub current: Option<u64>,
    pub total: Option<u64>,
    pub total_time_in_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryCacheStats {
    pub memory_size_in_bytes: Option<u64>,
    pub total_count: Option<u64>,
    pub hit_count: Option<u64>,
    pub miss_count: Option<u64>,
    pub cache_size: Option<u64>,
    pub cache_count: Option<u64>,
    pub evictions: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FielddataStats {
    pub memory_size_in_bytes: Option<u64>,
    pub evictions: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionStats {
    pub size_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentsStats {
    pub count: Option<u64>,
    pub memory_in_bytes: Option<u64>,
    pub terms_memory_in_bytes: Option<u64>,
    pub stored_fields_memory_in_bytes: Option<u64>,
    pub term_vectors_memory_in_bytes: Option<u64>,
    pub norms_memory_in_bytes: Option<u64>,
    pub points_memory_in_bytes: Option<u64>,
    pub doc_values_memory_in_bytes: Option<u64>,
    pub index_writer_memory_in_bytes: Option<u64>,
    pub version_map_memory_in_bytes: Option<u64>,
    pub fixed_bit_set_memory_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslogStats {
    pub operations: Option<u64>,
    pub size_in_bytes: Option<u64>,
    pub uncommitted_operations: Option<u64>,
    pub uncommitted_size_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestCacheStats {
    pub memory_size_in_bytes: Option<u64>,
    pub evictions: Option<u64>,
    pub hit_count: Option<u64>,
    pub miss_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecoveryStats {
    pub current_as_source: Option<u64>,
    pub current_as_target: Option<u64>,
    pub throttle_time_in_millis: Option<u64>,
}

/// The statistic groups Elasticsearch reports both per index (under
/// `primaries`/`total`) and aggregated per node (under `indices`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicesStatsSummary {
    pub docs: Option<DocsStats>,
    pub store: Option<StoreStats>,
    pub indexing: Option<IndexingStats>,
    pub get: Option<GetStats>,
    pub search: Option<SearchStats>,
    pub merges: Option<MergesStats>,
    pub refresh: Option<RefreshStats>,
    pub flush: Option<FlushStats>,
    pub warmer: Option<WarmerStats>,
    pub query_cache: Option<QueryCacheStats>,
    pub fielddata: Option<FielddataStats>,
    pub completion: Option<CompletionStats>,
    pub segments: Option<SegmentsStats>,
    pub translog: Option<TranslogStats>,
    pub request_cache: Option<RequestCacheStats>,
    pub recovery: Option<RecoveryStats>,
}
