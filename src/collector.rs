//! Metric collector: walks the four statistics aggregates and populates
//! the catalog.
//!
//! Registration and collection are split the way the original exporter
//! splits them: `register_metrics` unconditionally declares every metric
//! this exporter can produce (a stable surface across scrapes), then
//! `collect` walks the aggregates and records whatever values are
//! present. Missing leaves are skipped, never zero-coerced.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::filters::{IndexFilter, SettingsFilter};
use crate::stats::cluster_health::{status_value, ClusterHealth};
use crate::stats::cluster_stats::ClusterStatsData;
use crate::stats::common::IndicesStatsSummary;
use crate::stats::indices_stats::IndicesStats;
use crate::stats::node_stats::NodeStats;

/// Anything recordable as a sample value.
trait MetricValue {
    fn as_metric(self) -> f64;
}

impl MetricValue for f64 {
    fn as_metric(self) -> f64 {
        self
    }
}

impl MetricValue for u64 {
    fn as_metric(self) -> f64 {
        self as f64
    }
}

impl MetricValue for bool {
    fn as_metric(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
}

fn seconds(millis: Option<u64>) -> Option<f64> {
    millis.map(|v| v as f64 / 1000.0)
}

fn kilobytes(kb: Option<u64>) -> Option<f64> {
    kb.map(|v| (v as f64) * 1024.0)
}

// Unlabeled metric tables, one per (scope, type) shape. Labeled metrics
// are registered individually below because their label sets differ.

const CLUSTER_HEALTH_GAUGES: &[(&str, &str)] = &[
    ("cluster_status", "Cluster health status (0=green, 1=yellow, 2=red)"),
    ("cluster_nodes_number", "Number of nodes in the cluster"),
    ("cluster_datanodes_number", "Number of data nodes in the cluster"),
    ("cluster_shards_active_percent", "Percent of active shards"),
    ("cluster_pending_tasks_number", "Number of pending cluster-level tasks"),
    ("cluster_task_max_waiting_time_seconds", "Max waiting time of pending tasks"),
    ("cluster_inflight_fetch_number", "Number of in-flight shard store fetches"),
    ("cluster_is_timedout_bool", "Whether the cluster health request timed out"),
];

const NODE_INDICES_GAUGES: &[(&str, &str)] = &[
    ("indices_doc_number", "Number of documents on this node"),
    ("indices_doc_deleted_number", "Number of deleted documents on this node"),
    ("indices_store_size_bytes", "Size of the store on this node"),
    ("indices_indexing_index_current_number", "Current number of index operations"),
    ("indices_indexing_delete_current_number", "Current number of delete operations"),
    ("indices_indexing_is_throttled_bool", "Whether indexing is throttled"),
    ("indices_get_current_number", "Current number of get operations"),
    ("indices_search_open_contexts_number", "Number of open search contexts"),
    ("indices_search_query_current_number", "Current number of query phases"),
    ("indices_search_fetch_current_number", "Current number of fetch phases"),
    ("indices_search_scroll_current_number", "Current number of open scrolls"),
    ("indices_search_suggest_current_number", "Current number of suggest requests"),
    ("indices_merges_current_number", "Current number of merges"),
    ("indices_merges_current_docs_number", "Current number of documents merging"),
    ("indices_merges_current_size_bytes", "Current size of merges"),
    ("indices_merges_total_auto_throttle_bytes", "Merge auto-throttle limit"),
    ("indices_refresh_listeners_number", "Number of pending refresh listeners"),
    ("indices_querycache_memory_size_bytes", "Query cache memory"),
    ("indices_querycache_cache_size_number", "Current number of query cache entries"),
    ("indices_fielddata_memory_size_bytes", "Fielddata memory"),
    ("indices_completion_size_bytes", "Completion suggester memory"),
    ("indices_segments_number", "Number of segments on this node"),
    ("indices_translog_operations_number", "Number of translog operations"),
    ("indices_translog_size_bytes", "Translog size"),
    ("indices_translog_uncommitted_operations_number", "Number of uncommitted translog operations"),
    ("indices_translog_uncommitted_size_bytes", "Uncommitted translog size"),
    ("indices_requestcache_memory_size_bytes", "Request cache memory"),
    ("indices_warmer_current_number", "Current number of warmer operations"),
];

const NODE_INDICES_COUNTERS: &[(&str, &str)] = &[
    ("indices_indexing_index_count", "Count of index operations"),
    ("indices_indexing_index_failed_count", "Count of failed index operations"),
    ("indices_indexing_index_time_seconds", "Time spent indexing"),
    ("indices_indexing_delete_count", "Count of delete operations"),
    ("indices_indexing_delete_time_seconds", "Time spent deleting"),
    ("indices_indexing_noop_update_count", "Count of noop updates"),
    ("indices_indexing_throttle_time_seconds", "Time indexing was throttled"),
    ("indices_get_count", "Count of get operations"),
    ("indices_get_time_seconds", "Time spent on get operations"),
    ("indices_get_exists_count", "Count of get operations that found a document"),
    ("indices_get_exists_time_seconds", "Time spent on successful get operations"),
    ("indices_get_missing_count", "Count of get operations that missed"),
    ("indices_get_missing_time_seconds", "Time spent on missed get operations"),
    ("indices_search_query_count", "Count of query phases"),
    ("indices_search_query_time_seconds", "Time spent in query phases"),
    ("indices_search_fetch_count", "Count of fetch phases"),
    ("indices_search_fetch_time_seconds", "Time spent in fetch phases"),
    ("indices_search_scroll_count", "Count of scroll requests"),
    ("indices_search_scroll_time_seconds", "Time scroll contexts were held open"),
    ("indices_search_suggest_count", "Count of suggest requests"),
    ("indices_search_suggest_time_seconds", "Time spent on suggest requests"),
    ("indices_merges_total_number", "Count of merges"),
    ("indices_merges_total_time_seconds", "Time spent merging"),
    ("indices_merges_total_docs_count", "Count of merged documents"),
    ("indices_merges_total_size_bytes", "Size of merged segments"),
    ("indices_merges_total_stopped_time_seconds", "Time merges were stopped"),
    ("indices_merges_total_throttled_time_seconds", "Time merges were throttled"),
    ("indices_refresh_total_count", "Count of refreshes"),
    ("indices_refresh_total_time_seconds", "Time spent refreshing"),
    ("indices_flush_total_count", "Count of flushes"),
    ("indices_flush_periodic_count", "Count of periodic flushes"),
    ("indices_flush_total_time_seconds", "Time spent flushing"),
    ("indices_querycache_total_count", "Count of query cache lookups"),
    ("indices_querycache_hit_count", "Count of query cache hits"),
    ("indices_querycache_miss_count", "Count of query cache misses"),
    ("indices_querycache_cache_count", "Count of queries ever cached"),
    ("indices_querycache_evictions_count", "Count of query cache evictions"),
    ("indices_fielddata_evictions_count", "Count of fielddata evictions"),
    ("indices_requestcache_hit_count", "Count of request cache hits"),
    ("indices_requestcache_miss_count", "Count of request cache misses"),
    ("indices_requestcache_evictions_count", "Count of request cache evictions"),
    ("indices_warmer_total_count", "Count of warmer operations"),
    ("indices_warmer_time_seconds", "Time spent warming"),
    ("indices_recovery_throttle_time_seconds", "Time recoveries were throttled"),
];

const JVM_GAUGES: &[(&str, &str)] = &[
    ("jvm_uptime_seconds", "JVM uptime"),
    ("jvm_mem_heap_used_bytes", "Used heap memory"),
    ("jvm_mem_heap_used_percent", "Used heap memory percent"),
    ("jvm_mem_heap_committed_bytes", "Committed heap memory"),
    ("jvm_mem_heap_max_bytes", "Max heap memory"),
    ("jvm_mem_nonheap_used_bytes", "Used non-heap memory"),
    ("jvm_mem_nonheap_committed_bytes", "Committed non-heap memory"),
    ("jvm_threads_number", "Number of JVM threads"),
    ("jvm_threads_peak_number", "Peak number of JVM threads"),
];

const FS_TOTAL_GAUGES: &[(&str, &str)] = &[
    ("fs_total_total_bytes", "Total size of the filesystem"),
    ("fs_total_free_bytes", "Free space on the filesystem"),
    ("fs_total_available_bytes", "Available space on the filesystem"),
];

const FS_IO_COUNTERS: &[(&str, &str)] = &[
    ("fs_io_total_operations", "Count of I/O operations"),
    ("fs_io_total_read_operations", "Count of read operations"),
    ("fs_io_total_write_operations", "Count of write operations"),
    ("fs_io_total_read_bytes", "Bytes read from disk"),
    ("fs_io_total_write_bytes", "Bytes written to disk"),
];

const TRANSPORT_COUNTERS: &[(&str, &str)] = &[
    ("transport_rx_packets_count", "Count of packets received"),
    ("transport_rx_bytes_count", "Bytes received"),
    ("transport_tx_packets_count", "Count of packets sent"),
    ("transport_tx_bytes_count", "Bytes sent"),
];

const PROCESS_GAUGES: &[(&str, &str)] = &[
    ("process_cpu_percent", "CPU usage of the Elasticsearch process"),
    ("process_mem_total_virtual_bytes", "Virtual memory of the process"),
    ("process_file_descriptors_open_number", "Open file descriptors"),
    ("process_file_descriptors_max_number", "Max file descriptors"),
];

const OS_GAUGES: &[(&str, &str)] = &[
    ("os_cpu_percent", "Host CPU usage"),
    ("os_mem_total_bytes", "Host total memory"),
    ("os_mem_free_bytes", "Host free memory"),
    ("os_mem_used_bytes", "Host used memory"),
    ("os_mem_free_percent", "Host free memory percent"),
    ("os_mem_used_percent", "Host used memory percent"),
    ("os_swap_total_bytes", "Host total swap"),
    ("os_swap_free_bytes", "Host free swap"),
    ("os_swap_used_bytes", "Host used swap"),
];

const SCRIPT_COUNTERS: &[(&str, &str)] = &[
    ("script_compilations_count", "Count of script compilations"),
    ("script_cache_evictions_count", "Count of script cache evictions"),
    ("script_compilation_limit_triggered_count", "Count of compilation limit hits"),
];

const INGEST_COUNTERS: &[(&str, &str)] = &[
    ("ingest_total_count", "Count of ingested documents"),
    ("ingest_total_time_seconds", "Time spent in ingest pipelines"),
    ("ingest_total_failed_count", "Count of failed ingest documents"),
];

const INDEX_GAUGES: &[(&str, &str)] = &[
    ("index_doc_number", "Number of documents in the index"),
    ("index_doc_deleted_number", "Number of deleted documents in the index"),
    ("index_store_size_bytes", "Store size of the index"),
    ("index_indexing_index_current_number", "Current number of index operations"),
    ("index_indexing_delete_current_number", "Current number of delete operations"),
    ("index_get_current_number", "Current number of get operations"),
    ("index_search_open_contexts_number", "Number of open search contexts"),
    ("index_search_query_current_number", "Current number of query phases"),
    ("index_search_fetch_current_number", "Current number of fetch phases"),
    ("index_search_scroll_current_number", "Current number of open scrolls"),
    ("index_merges_current_number", "Current number of merges"),
    ("index_merges_current_docs_number", "Current number of documents merging"),
    ("index_merges_current_size_bytes", "Current size of merges"),
    ("index_refresh_listeners_number", "Number of pending refresh listeners"),
    ("index_querycache_memory_size_bytes", "Query cache memory"),
    ("index_querycache_cache_size_number", "Current number of query cache entries"),
    ("index_fielddata_memory_size_bytes", "Fielddata memory"),
    ("index_completion_size_bytes", "Completion suggester memory"),
    ("index_segments_number", "Number of segments"),
    ("index_translog_operations_number", "Number of translog operations"),
    ("index_translog_size_bytes", "Translog size"),
    ("index_requestcache_memory_size_bytes", "Request cache memory"),
    ("index_warmer_current_number", "Current number of warmer operations"),
];

const INDEX_COUNTERS: &[(&str, &str)] = &[
    ("index_indexing_index_count", "Count of index operations"),
    ("index_indexing_index_failed_count", "Count of failed index operations"),
    ("index_indexing_index_time_seconds", "Time spent indexing"),
    ("index_indexing_delete_count", "Count of delete operations"),
    ("index_indexing_delete_time_seconds", "Time spent deleting"),
    ("index_indexing_noop_update_count", "Count of noop updates"),
    ("index_indexing_throttle_time_seconds", "Time indexing was throttled"),
    ("index_get_count", "Count of get operations"),
    ("index_get_time_seconds", "Time spent on get operations"),
    ("index_get_exists_count", "Count of get operations that found a document"),
    ("index_get_missing_count", "Count of get operations that missed"),
    ("index_search_query_count", "Count of query phases"),
    ("index_search_query_time_seconds", "Time spent in query phases"),
    ("index_search_fetch_count", "Count of fetch phases"),
    ("index_search_fetch_time_seconds", "Time spent in fetch phases"),
    ("index_search_scroll_count", "Count of scroll requests"),
    ("index_search_scroll_time_seconds", "Time scroll contexts were held open"),
    ("index_merges_total_number", "Count of merges"),
    ("index_merges_total_time_seconds", "Time spent merging"),
    ("index_merges_total_docs_count", "Count of merged documents"),
    ("index_merges_total_size_bytes", "Size of merged segments"),
    ("index_refresh_total_count", "Count of refreshes"),
    ("index_refresh_total_time_seconds", "Time spent refreshing"),
    ("index_flush_total_count", "Count of flushes"),
    ("index_flush_total_time_seconds", "Time spent flushing"),
    ("index_querycache_hit_count", "Count of query cache hits"),
    ("index_querycache_miss_count", "Count of query cache misses"),
    ("index_querycache_evictions_count", "Count of query cache evictions"),
    ("index_fielddata_evictions_count", "Count of fielddata evictions"),
    ("index_requestcache_hit_count", "Count of request cache hits"),
    ("index_requestcache_miss_count", "Count of request cache misses"),
    ("index_requestcache_evictions_count", "Count of request cache evictions"),
    ("index_warmer_total_count", "Count of warmer operations"),
    ("index_warmer_time_seconds", "Time spent warming"),
    ("index_recovery_throttle_time_seconds", "Time recoveries were throttled"),
];

const CLUSTERSTATS_GAUGES: &[(&str, &str)] = &[
    ("clusterstats_indices_number", "Number of indices in the cluster"),
    ("clusterstats_shards_replication_ratio", "Replication factor across the cluster"),
    ("clusterstats_docs_number", "Number of documents in the cluster"),
    ("clusterstats_docs_deleted_number", "Number of deleted documents in the cluster"),
    ("clusterstats_store_size_bytes", "Store size across the cluster"),
    ("clusterstats_fielddata_memory_size_bytes", "Fielddata memory across the cluster"),
    ("clusterstats_querycache_memory_size_bytes", "Query cache memory across the cluster"),
    ("clusterstats_completion_size_bytes", "Completion suggester memory across the cluster"),
    ("clusterstats_segments_number", "Number of segments across the cluster"),
    ("clusterstats_segments_memory_bytes", "Segment memory across the cluster"),
    ("clusterstats_jvm_threads_number", "JVM threads across the cluster"),
    ("clusterstats_jvm_heap_used_bytes", "Used JVM heap across the cluster"),
    ("clusterstats_jvm_heap_max_bytes", "Max JVM heap across the cluster"),
    ("clusterstats_fs_total_bytes", "Total filesystem size across the cluster"),
    ("clusterstats_fs_free_bytes", "Free filesystem space across the cluster"),
    ("clusterstats_fs_available_bytes", "Available filesystem space across the cluster"),
];

/// Populates one catalog from the four source aggregates, honoring the
/// per-index and cluster-settings export filters.
pub struct Collector<'a> {
    catalog: &'a mut Catalog,
    index_filter: &'a IndexFilter,
    settings_filter: &'a SettingsFilter,
}

impl<'a> Collector<'a> {
    pub fn new(
        catalog: &'a mut Catalog,
        index_filter: &'a IndexFilter,
        settings_filter: &'a SettingsFilter,
    ) -> Self {
        Self {
            catalog,
            index_filter,
            settings_filter,
        }
    }

    /// Registers every metric this exporter can produce, unconditionally.
    pub fn register_metrics(&mut self) -> Result<(), CatalogError> {
        let c = &mut *self.catalog;

        for &(name, help) in CLUSTER_HEALTH_GAUGES {
            c.register_cluster_gauge(name, help, &[])?;
        }
        c.register_cluster_gauge("cluster_shards_number", "Number of shards by state", &["type"])?;

        for &(name, help) in NODE_INDICES_GAUGES {
            c.register_node_gauge(name, help, &[])?;
        }
        for &(name, help) in NODE_INDICES_COUNTERS {
            c.register_node_counter(name, help, &[])?;
        }
        c.register_node_gauge(
            "indices_segments_memory_bytes",
            "Segment memory by component",
            &["type"],
        )?;
        c.register_node_gauge(
            "indices_recovery_current_number",
            "Current number of recoveries by role",
            &["type"],
        )?;

        for &(name, help) in JVM_GAUGES {
            c.register_node_gauge(name, help, &[])?;
        }
        c.register_node_gauge("jvm_mem_pool_used_bytes", "Used memory per JVM pool", &["pool"])?;
        c.register_node_gauge("jvm_mem_pool_max_bytes", "Max memory per JVM pool", &["pool"])?;
        c.register_node_gauge(
            "jvm_mem_pool_peak_used_bytes",
            "Peak used memory per JVM pool",
            &["pool"],
        )?;
        c.register_node_gauge(
            "jvm_mem_pool_peak_max_bytes",
            "Peak max memory per JVM pool",
            &["pool"],
        )?;
        c.register_node_counter(
            "jvm_gc_collection_count",
            "Count of GC collections per collector",
            &["gc"],
        )?;
        c.register_node_counter(
            "jvm_gc_collection_time_seconds",
            "Time spent in GC per collector",
            &["gc"],
        )?;
        c.register_node_gauge("jvm_bufferpool_number", "Number of buffers per pool", &["bufferpool"])?;
        c.register_node_gauge(
            "jvm_bufferpool_used_bytes",
            "Used memory per buffer pool",
            &["bufferpool"],
        )?;
        c.register_node_gauge(
            "jvm_bufferpool_total_capacity_bytes",
            "Total capacity per buffer pool",
            &["bufferpool"],
        )?;

        c.register_node_gauge(
            "threadpool_threads_number",
            "Number of threads per pool",
            &["name", "type"],
        )?;
        c.register_node_counter(
            "threadpool_threads_count",
            "Count of tasks per pool",
            &["name", "type"],
        )?;
        c.register_node_gauge(
            "threadpool_tasks_number",
            "Number of queued tasks per pool",
            &["name", "type"],
        )?;

        for &(name, help) in FS_TOTAL_GAUGES {
            c.register_node_gauge(name, help, &[])?;
        }
        c.register_node_gauge("fs_path_total_bytes", "Total size per data path", &["path", "mount", "type"])?;
        c.register_node_gauge("fs_path_free_bytes", "Free space per data path", &["path", "mount", "type"])?;
        c.register_node_gauge(
            "fs_path_available_bytes",
            "Available space per data path",
            &["path", "mount", "type"],
        )?;
        for &(name, help) in FS_IO_COUNTERS {
            c.register_node_counter(name, help, &[])?;
        }

        c.register_node_gauge("transport_server_open_number", "Open transport connections", &[])?;
        for &(name, help) in TRANSPORT_COUNTERS {
            c.register_node_counter(name, help, &[])?;
        }

        c.register_node_gauge("http_open_server_number", "Open HTTP connections", &[])?;
        c.register_node_counter("http_open_total_count", "Count of opened HTTP connections", &[])?;

        for &(name, help) in PROCESS_GAUGES {
            c.register_node_gauge(name, help, &[])?;
        }
        c.register_node_counter("process_cpu_time_seconds", "CPU time used by the process", &[])?;

        for &(name, help) in OS_GAUGES {
            c.register_node_gauge(name, help, &[])?;
        }
        c.register_node_gauge("os_load_average", "Host load average", &["avg"])?;

        c.register_node_gauge("circuitbreaker_limit_bytes", "Circuit breaker limit", &["name"])?;
        c.register_node_gauge(
            "circuitbreaker_estimated_bytes",
            "Circuit breaker estimated size",
            &["name"],
        )?;
        c.register_node_gauge("circuitbreaker_overhead_ratio", "Circuit breaker overhead", &["name"])?;
        c.register_node_counter("circuitbreaker_tripped_count", "Count of breaker trips", &["name"])?;

        for &(name, help) in SCRIPT_COUNTERS {
            c.register_node_counter(name, help, &[])?;
        }

        for &(name, help) in INGEST_COUNTERS {
            c.register_node_counter(name, help, &[])?;
        }
        c.register_node_gauge("ingest_total_current_number", "Current number of ingest documents", &[])?;

        for &(name, help) in INDEX_GAUGES {
            c.register_cluster_gauge(name, help, &["index", "context"])?;
        }
        for &(name, help) in INDEX_COUNTERS {
            c.register_cluster_counter(name, help, &["index", "context"])?;
        }
        c.register_cluster_gauge(
            "index_segments_memory_bytes",
            "Segment memory by component",
            &["index", "context", "type"],
        )?;
        c.register_cluster_gauge(
            "index_recovery_current_number",
            "Current number of recoveries by role",
            &["index", "context", "type"],
        )?;

        for &(name, help) in CLUSTERSTATS_GAUGES {
            c.register_cluster_gauge(name, help, &[])?;
        }
        c.register_cluster_gauge(
            "clusterstats_shards_number",
            "Number of shards across the cluster",
            &["type"],
        )?;
        c.register_cluster_gauge(
            "clusterstats_nodes_number",
            "Number of nodes by role",
            &["role"],
        )?;

        c.register_cluster_gauge(
            "cluster_settings_info",
            "Exposed cluster settings as key/value labels, value is always 1",
            &["setting", "value"],
        )?;

        Ok(())
    }

    /// Walks all four aggregates and records samples.
    pub fn collect(
        &mut self,
        cluster_health: &ClusterHealth,
        node_stats: &NodeStats,
        indices_stats: &IndicesStats,
        cluster_stats: &ClusterStatsData,
    ) -> Result<(), CatalogError> {
        self.update_cluster_health(cluster_health)?;
        self.update_node_indices(node_stats)?;
        self.update_jvm(node_stats)?;
        self.update_thread_pools(node_stats)?;
        self.update_fs(node_stats)?;
        self.update_transport(node_stats)?;
        self.update_http(node_stats)?;
        self.update_process(node_stats)?;
        self.update_os(node_stats)?;
        self.update_breakers(node_stats)?;
        self.update_script(node_stats)?;
        self.update_ingest(node_stats)?;
        self.update_per_index(indices_stats)?;
        self.update_cluster_stats(cluster_stats)?;
        self.update_settings(cluster_stats)?;
        Ok(())
    }

    fn set_cluster<V: MetricValue>(
        &mut self,
        name: &str,
        value: Option<V>,
    ) -> Result<(), CatalogError> {
        self.set_cluster_with(name, value, &[])
    }

    fn set_cluster_with<V: MetricValue>(
        &mut self,
        name: &str,
        value: Option<V>,
        extra: &[&str],
    ) -> Result<(), CatalogError> {
        if let Some(v) = value {
            self.catalog.record_cluster(name, v.as_metric(), extra)?;
        }
        Ok(())
    }

    fn set_node<V: MetricValue>(
        &mut self,
        name: &str,
        value: Option<V>,
    ) -> Result<(), CatalogError> {
        self.set_node_with(name, value, &[])
    }

    fn set_node_with<V: MetricValue>(
        &mut self,
        name: &str,
        value: Option<V>,
        extra: &[&str],
    ) -> Result<(), CatalogError> {
        if let Some(v) = value {
            self.catalog.record_node(name, v.as_metric(), extra)?;
        }
        Ok(())
    }

    fn update_cluster_health(&mut self, health: &ClusterHealth) -> Result<(), CatalogError> {
        let status = health.status.as_deref().and_then(status_value);
        self.set_cluster("cluster_status", status)?;
        self.set_cluster("cluster_nodes_number", health.number_of_nodes)?;
        self.set_cluster("cluster_datanodes_number", health.number_of_data_nodes)?;
        self.set_cluster(
            "cluster_shards_active_percent",
            health.active_shards_percent_as_number,
        )?;
        self.set_cluster_with("cluster_shards_number", health.active_shards, &["active"])?;
        self.set_cluster_with(
            "cluster_shards_number",
            health.active_primary_shards,
            &["active_primary"],
        )?;
        self.set_cluster_with(
            "cluster_shards_number",
            health.relocating_shards,
            &["relocating"],
        )?;
        self.set_cluster_with(
            "cluster_shards_number",
            health.initializing_shards,
            &["initializing"],
        )?;
        self.set_cluster_with(
            "cluster_shards_number",
            health.unassigned_shards,
            &["unassigned"],
        )?;
        self.set_cluster_with(
            "cluster_shards_number",
            health.delayed_unassigned_shards,
            &["delayed_unassigned"],
        )?;
        self.set_cluster("cluster_pending_tasks_number", health.number_of_pending_tasks)?;
        self.set_cluster(
            "cluster_task_max_waiting_time_seconds",
            seconds(health.task_max_waiting_in_queue_millis),
        )?;
        self.set_cluster("cluster_inflight_fetch_number", health.number_of_in_flight_fetch)?;
        self.set_cluster("cluster_is_timedout_bool", health.timed_out)?;
        Ok(())
    }

    fn update_node_indices(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(indices) = &node.indices else {
            return Ok(());
        };

        if let Some(docs) = &indices.docs {
            self.set_node("indices_doc_number", docs.count)?;
            self.set_node("indices_doc_deleted_number", docs.deleted)?;
        }
        if let Some(store) = &indices.store {
            self.set_node("indices_store_size_bytes", store.size_in_bytes)?;
        }
        if let Some(indexing) = &indices.indexing {
            self.set_node("indices_indexing_index_count", indexing.index_total)?;
            self.set_node("indices_indexing_index_current_number", indexing.index_current)?;
            self.set_node("indices_indexing_index_failed_count", indexing.index_failed)?;
            self.set_node(
                "indices_indexing_index_time_seconds",
                seconds(indexing.index_time_in_millis),
            )?;
            self.set_node("indices_indexing_delete_count", indexing.delete_total)?;
            self.set_node("indices_indexing_delete_current_number", indexing.delete_current)?;
            self.set_node(
                "indices_indexing_delete_time_seconds",
                seconds(indexing.delete_time_in_millis),
            )?;
            self.set_node("indices_indexing_noop_update_count", indexing.noop_update_total)?;
            self.set_node("indices_indexing_is_throttled_bool", indexing.is_throttled)?;
            self.set_node(
                "indices_indexing_throttle_time_seconds",
                seconds(indexing.throttle_time_in_millis),
            )?;
        }
        if let Some(get) = &indices.get {
            self.set_node("indices_get_count", get.total)?;
            self.set_node("indices_get_time_seconds", seconds(get.time_in_millis))?;
            self.set_node("indices_get_exists_count", get.exists_total)?;
            self.set_node(
                "indices_get_exists_time_seconds",
                seconds(get.exists_time_in_millis),
            )?;
            self.set_node("indices_get_missing_count", get.missing_total)?;
            self.set_node(
                "indices_get_missing_time_seconds",
                seconds(get.missing_time_in_millis),
            )?;
            self.set_node("indices_get_current_number", get.current)?;
        }
        if let Some(search) = &indices.search {
            self.set_node("indices_search_open_contexts_number", search.open_contexts)?;
            self.set_node("indices_search_query_count", search.query_total)?;
            self.set_node(
                "indices_search_query_time_seconds",
                seconds(search.query_time_in_millis),
            )?;
            self.set_node("indices_search_query_current_number", search.query_current)?;
            self.set_node("indices_search_fetch_count", search.fetch_total)?;
            self.set_node(
                "indices_search_fetch_time_seconds",
                seconds(search.fetch_time_in_millis),
            )?;
            self.set_node("indices_search_fetch_current_number", search.fetch_current)?;
            self.set_node("indices_search_scroll_count", search.scroll_total)?;
            self.set_node(
                "indices_search_scroll_time_seconds",
                seconds(search.scroll_time_in_millis),
            )?;
            self.set_node("indices_search_scroll_current_number", search.scroll_current)?;
            self.set_node("indices_search_suggest_count", search.suggest_total)?;
            self.set_node(
                "indices_search_suggest_time_seconds",
                seconds(search.suggest_time_in_millis),
            )?;
            self.set_node("indices_search_suggest_current_number", search.suggest_current)?;
        }
        if let Some(merges) = &indices.merges {
            self.set_node("indices_merges_current_number", merges.current)?;
            self.set_node("indices_merges_current_docs_number", merges.current_docs)?;
            self.set_node("indices_merges_current_size_bytes", merges.current_size_in_bytes)?;
            self.set_node("indices_merges_total_number", merges.total)?;
            self.set_node(
                "indices_merges_total_time_seconds",
                seconds(merges.total_time_in_millis),
            )?;
            self.set_node("indices_merges_total_docs_count", merges.total_docs)?;
            self.set_node("indices_merges_total_size_bytes", merges.total_size_in_bytes)?;
            self.set_node(
                "indices_merges_total_stopped_time_seconds",
                seconds(merges.total_stopped_time_in_millis),
            )?;
            self.set_node(
                "indices_merges_total_throttled_time_seconds",
                seconds(merges.total_throttled_time_in_millis),
            )?;
            self.set_node(
                "indices_merges_total_auto_throttle_bytes",
                merges.total_auto_throttle_in_bytes,
            )?;
        }
        if let Some(refresh) = &indices.refresh {
            self.set_node("indices_refresh_total_count", refresh.total)?;
            self.set_node(
                "indices_refresh_total_time_seconds",
                seconds(refresh.total_time_in_millis),
            )?;
            self.set_node("indices_refresh_listeners_number", refresh.listeners)?;
        }
        if let Some(flush) = &indices.flush {
            self.set_node("indices_flush_total_count", flush.total)?;
            self.set_node("indices_flush_periodic_count", flush.periodic)?;
            self.set_node(
                "indices_flush_total_time_seconds",
                seconds(flush.total_time_in_millis),
            )?;
        }
        if let Some(warmer) = &indices.warmer {
            self.set_node("indices_warmer_current_number", warmer.current)?;
            self.set_node("indices_warmer_total_count", warmer.total)?;
            self.set_node(
                "indices_warmer_time_seconds",
                seconds(warmer.total_time_in_millis),
            )?;
        }
        if let Some(query_cache) = &indices.query_cache {
            self.set_node(
                "indices_querycache_memory_size_bytes",
                query_cache.memory_size_in_bytes,
            )?;
            self.set_node("indices_querycache_total_count", query_cache.total_count)?;
            self.set_node("indices_querycache_hit_count", query_cache.hit_count)?;
            self.set_node("indices_querycache_miss_count", query_cache.miss_count)?;
            self.set_node("indices_querycache_cache_size_number", query_cache.cache_size)?;
            self.set_node("indices_querycache_cache_count", query_cache.cache_count)?;
            self.set_node("indices_querycache_evictions_count", query_cache.evictions)?;
        }
        if let Some(fielddata) = &indices.fielddata {
            self.set_node(
                "indices_fielddata_memory_size_bytes",
                fielddata.memory_size_in_bytes,
            )?;
            self.set_node("indices_fielddata_evictions_count", fielddata.evictions)?;
        }
        if let Some(completion) = &indices.completion {
            self.set_node("indices_completion_size_bytes", completion.size_in_bytes)?;
        }
        if let Some(segments) = &indices.segments {
            self.set_node("indices_segments_number", segments.count)?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.memory_in_bytes,
                &["all"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.terms_memory_in_bytes,
                &["terms"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.stored_fields_memory_in_bytes,
                &["storedfields"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.term_vectors_memory_in_bytes,
                &["termvectors"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.norms_memory_in_bytes,
                &["norms"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.points_memory_in_bytes,
                &["points"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.doc_values_memory_in_bytes,
                &["docvalues"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.index_writer_memory_in_bytes,
                &["indexwriter"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.version_map_memory_in_bytes,
                &["versionmap"],
            )?;
            self.set_node_with(
                "indices_segments_memory_bytes",
                segments.fixed_bit_set_memory_in_bytes,
                &["bitset"],
            )?;
        }
        if let Some(translog) = &indices.translog {
            self.set_node("indices_translog_operations_number", translog.operations)?;
            self.set_node("indices_translog_size_bytes", translog.size_in_bytes)?;
            self.set_node(
                "indices_translog_uncommitted_operations_number",
                translog.uncommitted_operations,
            )?;
            self.set_node(
                "indices_translog_uncommitted_size_bytes",
                translog.uncommitted_size_in_bytes,
            )?;
        }
        if let Some(request_cache) = &indices.request_cache {
            self.set_node(
                "indices_requestcache_memory_size_bytes",
                request_cache.memory_size_in_bytes,
            )?;
            self.set_node("indices_requestcache_hit_count", request_cache.hit_count)?;
            self.set_node("indices_requestcache_miss_count", request_cache.miss_count)?;
            self.set_node("indices_requestcache_evictions_count", request_cache.evictions)?;
        }
        if let Some(recovery) = &indices.recovery {
            self.set_node_with(
                "indices_recovery_current_number",
                recovery.current_as_source,
                &["source"],
            )?;
            self.set_node_with(
                "indices_recovery_current_number",
                recovery.current_as_target,
                &["target"],
            )?;
            self.set_node(
                "indices_recovery_throttle_time_seconds",
                seconds(recovery.throttle_time_in_millis),
            )?;
        }

        Ok(())
    }

    fn update_jvm(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(jvm) = &node.jvm else {
            return Ok(());
        };

        self.set_node("jvm_uptime_seconds", seconds(jvm.uptime_in_millis))?;
        if let Some(mem) = &jvm.mem {
            self.set_node("jvm_mem_heap_used_bytes", mem.heap_used_in_bytes)?;
            self.set_node("jvm_mem_heap_used_percent", mem.heap_used_percent)?;
            self.set_node("jvm_mem_heap_committed_bytes", mem.heap_committed_in_bytes)?;
            self.set_node("jvm_mem_heap_max_bytes", mem.heap_max_in_bytes)?;
            self.set_node("jvm_mem_nonheap_used_bytes", mem.non_heap_used_in_bytes)?;
            self.set_node("jvm_mem_nonheap_committed_bytes", mem.non_heap_committed_in_bytes)?;
            for (pool, stats) in &mem.pools {
                let pool = pool.as_str();
                self.set_node_with("jvm_mem_pool_used_bytes", stats.used_in_bytes, &[pool])?;
                self.set_node_with("jvm_mem_pool_max_bytes", stats.max_in_bytes, &[pool])?;
                self.set_node_with(
                    "jvm_mem_pool_peak_used_bytes",
                    stats.peak_used_in_bytes,
                    &[pool],
                )?;
                self.set_node_with(
                    "jvm_mem_pool_peak_max_bytes",
                    stats.peak_max_in_bytes,
                    &[pool],
                )?;
            }
        }
        if let Some(threads) = &jvm.threads {
            self.set_node("jvm_threads_number", threads.count)?;
            self.set_node("jvm_threads_peak_number", threads.peak_count)?;
        }
        if let Some(gc) = &jvm.gc {
            for (collector, stats) in &gc.collectors {
                let collector = collector.as_str();
                self.set_node_with("jvm_gc_collection_count", stats.collection_count, &[collector])?;
                self.set_node_with(
                    "jvm_gc_collection_time_seconds",
                    seconds(stats.collection_time_in_millis),
                    &[collector],
                )?;
            }
        }
        for (pool, stats) in &jvm.buffer_pools {
            let pool = pool.as_str();
            self.set_node_with("jvm_bufferpool_number", stats.count, &[pool])?;
            self.set_node_with("jvm_bufferpool_used_bytes", stats.used_in_bytes, &[pool])?;
            self.set_node_with(
                "jvm_bufferpool_total_capacity_bytes",
                stats.total_capacity_in_bytes,
                &[pool],
            )?;
        }

        Ok(())
    }

    fn update_thread_pools(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        for (name, stats) in &node.thread_pool {
            let name = name.as_str();
            self.set_node_with("threadpool_threads_number", stats.threads, &[name, "threads"])?;
            self.set_node_with("threadpool_threads_number", stats.active, &[name, "active"])?;
            self.set_node_with("threadpool_threads_number", stats.largest, &[name, "largest"])?;
            self.set_node_with("threadpool_threads_count", stats.completed, &[name, "completed"])?;
            self.set_node_with("threadpool_threads_count", stats.rejected, &[name, "rejected"])?;
            self.set_node_with("threadpool_tasks_number", stats.queue, &[name, "queue"])?;
        }
        Ok(())
    }

    fn update_fs(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(fs) = &node.fs else {
            return Ok(());
        };

        if let Some(total) = &fs.total {
            self.set_node("fs_total_total_bytes", total.total_in_bytes)?;
            self.set_node("fs_total_free_bytes", total.free_in_bytes)?;
            self.set_node("fs_total_available_bytes", total.available_in_bytes)?;
        }
        for entry in &fs.data {
            let labels = [entry.path.as_str(), entry.mount.as_str(), entry.filesystem_type.as_str()];
            self.set_node_with("fs_path_total_bytes", entry.total_in_bytes, &labels)?;
            self.set_node_with("fs_path_free_bytes", entry.free_in_bytes, &labels)?;
            self.set_node_with("fs_path_available_bytes", entry.available_in_bytes, &labels)?;
        }
        if let Some(totals) = fs.io_stats.as_ref().and_then(|io| io.total.as_ref()) {
            self.set_node("fs_io_total_operations", totals.operations)?;
            self.set_node("fs_io_total_read_operations", totals.read_operations)?;
            self.set_node("fs_io_total_write_operations", totals.write_operations)?;
            self.set_node("fs_io_total_read_bytes", kilobytes(totals.read_kilobytes))?;
            self.set_node("fs_io_total_write_bytes", kilobytes(totals.write_kilobytes))?;
        }

        Ok(())
    }

    fn update_transport(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(transport) = &node.transport else {
            return Ok(());
        };

        self.set_node("transport_server_open_number", transport.server_open)?;
        self.set_node("transport_rx_packets_count", transport.rx_count)?;
        self.set_node("transport_rx_bytes_count", transport.rx_size_in_bytes)?;
        self.set_node("transport_tx_packets_count", transport.tx_count)?;
        self.set_node("transport_tx_bytes_count", transport.tx_size_in_bytes)?;
        Ok(())
    }

    fn update_http(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(http) = &node.http else {
            return Ok(());
        };

        self.set_node("http_open_server_number", http.current_open)?;
        self.set_node("http_open_total_count", http.total_opened)?;
        Ok(())
    }

    fn update_process(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(process) = &node.process else {
            return Ok(());
        };

        self.set_node(
            "process_file_descriptors_open_number",
            process.open_file_descriptors,
        )?;
        self.set_node(
            "process_file_descriptors_max_number",
            process.max_file_descriptors,
        )?;
        if let Some(cpu) = &process.cpu {
            self.set_node("process_cpu_percent", cpu.percent)?;
            self.set_node("process_cpu_time_seconds", seconds(cpu.total_in_millis))?;
        }
        if let Some(mem) = &process.mem {
            self.set_node("process_mem_total_virtual_bytes", mem.total_virtual_in_bytes)?;
        }
        Ok(())
    }

    fn update_os(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(os) = &node.os else {
            return Ok(());
        };

        if let Some(cpu) = &os.cpu {
            self.set_node("os_cpu_percent", cpu.percent)?;
            if let Some(load) = &cpu.load_average {
                self.set_node_with("os_load_average", load.one_minute, &["1m"])?;
                self.set_node_with("os_load_average", load.five_minutes, &["5m"])?;
                self.set_node_with("os_load_average", load.fifteen_minutes, &["15m"])?;
            }
        }
        if let Some(mem) = &os.mem {
            self.set_node("os_mem_total_bytes", mem.total_in_bytes)?;
            self.set_node("os_mem_free_bytes", mem.free_in_bytes)?;
            self.set_node("os_mem_used_bytes", mem.used_in_bytes)?;
            self.set_node("os_mem_free_percent", mem.free_percent)?;
            self.set_node("os_mem_used_percent", mem.used_percent)?;
        }
        if let Some(swap) = &os.swap {
            self.set_node("os_swap_total_bytes", swap.total_in_bytes)?;
            self.set_node("os_swap_free_bytes", swap.free_in_bytes)?;
            self.set_node("os_swap_used_bytes", swap.used_in_bytes)?;
        }
        Ok(())
    }

    fn update_breakers(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        for (name, stats) in &node.breakers {
            let name = name.as_str();
            self.set_node_with("circuitbreaker_limit_bytes", stats.limit_size_in_bytes, &[name])?;
            self.set_node_with(
                "circuitbreaker_estimated_bytes",
                stats.estimated_size_in_bytes,
                &[name],
            )?;
            self.set_node_with("circuitbreaker_overhead_ratio", stats.overhead, &[name])?;
            self.set_node_with("circuitbreaker_tripped_count", stats.tripped, &[name])?;
        }
        Ok(())
    }

    fn update_script(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(script) = &node.script else {
            return Ok(());
        };

        self.set_node("script_compilations_count", script.compilations)?;
        self.set_node("script_cache_evictions_count", script.cache_evictions)?;
        self.set_node(
            "script_compilation_limit_triggered_count",
            script.compilation_limit_triggered,
        )?;
        Ok(())
    }

    fn update_ingest(&mut self, node: &NodeStats) -> Result<(), CatalogError> {
        let Some(totals) = node.ingest.as_ref().and_then(|i| i.total.as_ref()) else {
            return Ok(());
        };

        self.set_node("ingest_total_count", totals.count)?;
        self.set_node("ingest_total_time_seconds", seconds(totals.time_in_millis))?;
        self.set_node("ingest_total_current_number", totals.current)?;
        self.set_node("ingest_total_failed_count", totals.failed)?;
        Ok(())
    }

    fn update_per_index(&mut self, stats: &IndicesStats) -> Result<(), CatalogError> {
        for (index_name, index) in &stats.indices {
            if !self.index_filter.admits(index_name) {
                continue;
            }
            if let Some(primaries) = &index.primaries {
                self.update_index_context(index_name, "primaries", primaries)?;
            }
            if let Some(total) = &index.total {
                self.update_index_context(index_name, "total", total)?;
            }
        }
        Ok(())
    }

    /// Records one (index, context) column of the per-index table.
    fn update_index_context(
        &mut self,
        index: &str,
        context: &str,
        summary: &IndicesStatsSummary,
    ) -> Result<(), CatalogError> {
        let labels = [index, context];

        if let Some(docs) = &summary.docs {
            self.set_cluster_with("index_doc_number", docs.count, &labels)?;
            self.set_cluster_with("index_doc_deleted_number", docs.deleted, &labels)?;
        }
        if let Some(store) = &summary.store {
            self.set_cluster_with("index_store_size_bytes", store.size_in_bytes, &labels)?;
        }
        if let Some(indexing) = &summary.indexing {
            self.set_cluster_with("index_indexing_index_count", indexing.index_total, &labels)?;
            self.set_cluster_with(
                "index_indexing_index_current_number",
                indexing.index_current,
                &labels,
            )?;
            self.set_cluster_with(
                "index_indexing_index_failed_count",
                indexing.index_failed,
                &labels,
            )?;
            self.set_cluster_with(
                "index_indexing_index_time_seconds",
                seconds(indexing.index_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with("index_indexing_delete_count", indexing.delete_total, &labels)?;
            self.set_cluster_with(
                "index_indexing_delete_current_number",
                indexing.delete_current,
                &labels,
            )?;
            self.set_cluster_with(
                "index_indexing_delete_time_seconds",
                seconds(indexing.delete_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with(
                "index_indexing_noop_update_count",
                indexing.noop_update_total,
                &labels,
            )?;
            self.set_cluster_with(
                "index_indexing_throttle_time_seconds",
                seconds(indexing.throttle_time_in_millis),
                &labels,
            )?;
        }
        if let Some(get) = &summary.get {
            self.set_cluster_with("index_get_count", get.total, &labels)?;
            self.set_cluster_with("index_get_time_seconds", seconds(get.time_in_millis), &labels)?;
            self.set_cluster_with("index_get_exists_count", get.exists_total, &labels)?;
            self.set_cluster_with("index_get_missing_count", get.missing_total, &labels)?;
            self.set_cluster_with("index_get_current_number", get.current, &labels)?;
        }
        if let Some(search) = &summary.search {
            self.set_cluster_with(
                "index_search_open_contexts_number",
                search.open_contexts,
                &labels,
            )?;
            self.set_cluster_with("index_search_query_count", search.query_total, &labels)?;
            self.set_cluster_with(
                "index_search_query_time_seconds",
                seconds(search.query_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with(
                "index_search_query_current_number",
                search.query_current,
                &labels,
            )?;
            self.set_cluster_with("index_search_fetch_count", search.fetch_total, &labels)?;
            self.set_cluster_with(
                "index_search_fetch_time_seconds",
                seconds(search.fetch_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with(
                "index_search_fetch_current_number",
                search.fetch_current,
                &labels,
            )?;
            self.set_cluster_with("index_search_scroll_count", search.scroll_total, &labels)?;
            self.set_cluster_with(
                "index_search_scroll_time_seconds",
                seconds(search.scroll_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with(
                "index_search_scroll_current_number",
                search.scroll_current,
                &labels,
            )?;
        }
        if let Some(merges) = &summary.merges {
            self.set_cluster_with("index_merges_current_number", merges.current, &labels)?;
            self.set_cluster_with(
                "index_merges_current_docs_number",
                merges.current_docs,
                &labels,
            )?;
            self.set_cluster_with(
                "index_merges_current_size_bytes",
                merges.current_size_in_bytes,
                &labels,
            )?;
            self.set_cluster_with("index_merges_total_number", merges.total, &labels)?;
            self.set_cluster_with(
                "index_merges_total_time_seconds",
                seconds(merges.total_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with("index_merges_total_docs_count", merges.total_docs, &labels)?;
            self.set_cluster_with(
                "index_merges_total_size_bytes",
                merges.total_size_in_bytes,
                &labels,
            )?;
        }
        if let Some(refresh) = &summary.refresh {
            self.set_cluster_with("index_refresh_total_count", refresh.total, &labels)?;
            self.set_cluster_with(
                "index_refresh_total_time_seconds",
                seconds(refresh.total_time_in_millis),
                &labels,
            )?;
            self.set_cluster_with("index_refresh_listeners_number", refresh.listeners, &labels)?;
        }
        if let Some(flush) = &summary.flush {
            self.set_cluster_with("index_flush_total_count", flush.total, &labels)?;
            self.set_cluster_with(
                "index_flush_total_time_seconds",
                seconds(flush.total_time_in_millis),
                &labels,
            )?;
        }
        if let Some(warmer) = &summary.warmer {
            self.set_cluster_with("index_warmer_current_number", warmer.current, &labels)?;
            self.set_cluster_with("index_warmer_total_count", warmer.total, &labels)?;
            self.set_cluster_with(
                "index_warmer_time_seconds",
                seconds(warmer.total_time_in_millis),
                &labels,
            )?;
        }
        if let Some(query_cache) = &summary.query_cache {
            self.set_cluster_with(
                "index_querycache_memory_size_bytes",
                query_cache.memory_size_in_bytes,
                &labels,
            )?;
            self.set_cluster_with("index_querycache_hit_count", query_cache.hit_count, &labels)?;
            self.set_cluster_with("index_querycache_miss_count", query_cache.miss_count, &labels)?;
            self.set_cluster_with(
                "index_querycache_cache_size_number",
                query_cache.cache_size,
                &labels,
            )?;
            self.set_cluster_with(
                "index_querycache_evictions_count",
                query_cache.evictions,
                &labels,
            )?;
        }
        if let Some(fielddata) = &summary.fielddata {
            self.set_cluster_with(
                "index_fielddata_memory_size_bytes",
                fielddata.memory_size_in_bytes,
                &labels,
            )?;
            self.set_cluster_with(
                "index_fielddata_evictions_count",
                fielddata.evictions,
                &labels,
            )?;
        }
        if let Some(completion) = &summary.completion {
            self.set_cluster_with("index_completion_size_bytes", completion.size_in_bytes, &labels)?;
        }
        if let Some(segments) = &summary.segments {
            self.set_cluster_with("index_segments_number", segments.count, &labels)?;
            let memory_parts: [(&str, Option<u64>); 10] = [
                ("all", segments.memory_in_bytes),
                ("terms", segments.terms_memory_in_bytes),
                ("storedfields", segments.stored_fields_memory_in_bytes),
                ("termvectors", segments.term_vectors_memory_in_bytes),
                ("norms", segments.norms_memory_in_bytes),
                ("points", segments.points_memory_in_bytes),
                ("docvalues", segments.doc_values_memory_in_bytes),
                ("indexwriter", segments.index_writer_memory_in_bytes),
                ("versionmap", segments.version_map_memory_in_bytes),
                ("bitset", segments.fixed_bit_set_memory_in_bytes),
            ];
            for (part, value) in memory_parts {
                self.set_cluster_with(
                    "index_segments_memory_bytes",
                    value,
                    &[index, context, part],
                )?;
            }
        }
        if let Some(translog) = &summary.translog {
            self.set_cluster_with(
                "index_translog_operations_number",
                translog.operations,
                &labels,
            )?;
            self.set_cluster_with("index_translog_size_bytes", translog.size_in_bytes, &labels)?;
        }
        if let Some(request_cache) = &summary.request_cache {
            self.set_cluster_with(
                "index_requestcache_memory_size_bytes",
                request_cache.memory_size_in_bytes,
                &labels,
            )?;
            self.set_cluster_with(
                "index_requestcache_hit_count",
                request_cache.hit_count,
                &labels,
            )?;
            self.set_cluster_with(
                "index_requestcache_miss_count",
                request_cache.miss_count,
                &labels,
            )?;
            self.set_cluster_with(
                "index_requestcache_evictions_count",
                request_cache.evictions,
                &labels,
            )?;
        }
        if let Some(recovery) = &summary.recovery {
            self.set_cluster_with(
                "index_recovery_current_number",
                recovery.current_as_source,
                &[index, context, "source"],
            )?;
            self.set_cluster_with(
                "index_recovery_current_number",
                recovery.current_as_target,
                &[index, context, "target"],
            )?;
            self.set_cluster_with(
                "index_recovery_throttle_time_seconds",
                seconds(recovery.throttle_time_in_millis),
                &labels,
            )?;
        }

        Ok(())
    }

    fn update_cluster_stats(&mut self, stats: &ClusterStatsData) -> Result<(), CatalogError> {
        if let Some(indices) = &stats.indices {
            self.set_cluster("clusterstats_indices_number", indices.count)?;
            if let Some(shards) = &indices.shards {
                self.set_cluster_with("clusterstats_shards_number", shards.total, &["total"])?;
                self.set_cluster_with(
                    "clusterstats_shards_number",
                    shards.primaries,
                    &["primaries"],
                )?;
                self.set_cluster("clusterstats_shards_replication_ratio", shards.replication)?;
            }
            if let Some(docs) = &indices.docs {
                self.set_cluster("clusterstats_docs_number", docs.count)?;
                self.set_cluster("clusterstats_docs_deleted_number", docs.deleted)?;
            }
            if let Some(store) = &indices.store {
                self.set_cluster("clusterstats_store_size_bytes", store.size_in_bytes)?;
            }
            if let Some(fielddata) = &indices.fielddata {
                self.set_cluster(
                    "clusterstats_fielddata_memory_size_bytes",
                    fielddata.memory_size_in_bytes,
                )?;
            }
            if let Some(query_cache) = &indices.query_cache {
                self.set_cluster(
                    "clusterstats_querycache_memory_size_bytes",
                    query_cache.memory_size_in_bytes,
                )?;
            }
            if let Some(completion) = &indices.completion {
                self.set_cluster("clusterstats_completion_size_bytes", completion.size_in_bytes)?;
            }
            if let Some(segments) = &indices.segments {
                self.set_cluster("clusterstats_segments_number", segments.count)?;
                self.set_cluster("clusterstats_segments_memory_bytes", segments.memory_in_bytes)?;
            }
        }

        if let Some(nodes) = &stats.nodes {
            if let Some(count) = &nodes.count {
                self.set_cluster_with("clusterstats_nodes_number", count.total, &["total"])?;
                self.set_cluster_with("clusterstats_nodes_number", count.data, &["data"])?;
                self.set_cluster_with("clusterstats_nodes_number", count.master, &["master"])?;
                self.set_cluster_with("clusterstats_nodes_number", count.ingest, &["ingest"])?;
            }
            if let Some(jvm) = &nodes.jvm {
                self.set_cluster("clusterstats_jvm_threads_number", jvm.threads)?;
                if let Some(mem) = &jvm.mem {
                    self.set_cluster("clusterstats_jvm_heap_used_bytes", mem.heap_used_in_bytes)?;
                    self.set_cluster("clusterstats_jvm_heap_max_bytes", mem.heap_max_in_bytes)?;
                }
            }
            if let Some(fs) = &nodes.fs {
                self.set_cluster("clusterstats_fs_total_bytes", fs.total_in_bytes)?;
                self.set_cluster("clusterstats_fs_free_bytes", fs.free_in_bytes)?;
                self.set_cluster("clusterstats_fs_available_bytes", fs.available_in_bytes)?;
            }
        }

        Ok(())
    }

    fn update_settings(&mut self, stats: &ClusterStatsData) -> Result<(), CatalogError> {
        for (key, value) in &stats.settings {
            if !self.settings_filter.admits(key) {
                continue;
            }
            self.catalog
                .record_cluster("cluster_settings_info", 1.0, &[key.as_str(), value.as_str()])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ExportFilters, PatternFilter};

    fn filters() -> ExportFilters {
        ExportFilters::new(
            IndexFilter::new(PatternFilter::new::<&str>(&[]).unwrap()),
            SettingsFilter::new(PatternFilter::new::<&str>(&[]).unwrap()),
        )
    }

    #[test]
    fn test_register_metrics_is_consistent() {
        let mut catalog = Catalog::new("c1", "n1", "id1", "es_");
        let filters = filters();
        let mut collector = Collector::new(&mut catalog, &filters.indices, &filters.settings);
        collector.register_metrics().unwrap();
        // A second registration pass must be a no-op, not a conflict.
        collector.register_metrics().unwrap();
    }

    #[test]
    fn test_collect_on_empty_aggregates_records_nothing_fatal() {
        let mut catalog = Catalog::new("c1", "n1", "id1", "es_");
        let filters = filters();
        let mut collector = Collector::new(&mut catalog, &filters.indices, &filters.settings);
        collector.register_metrics().unwrap();
        collector
            .collect(
                &ClusterHealth::default(),
                &NodeStats::default(),
                &IndicesStats::default(),
                &ClusterStatsData::default(),
            )
            .unwrap();
    }
}
