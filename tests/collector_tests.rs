//! Integration tests for the metric collector.
//!
//! These tests feed realistic Elasticsearch stats documents through the
//! collector and verify the statistic-to-metric mapping, the index
//! filter behavior, and the settings info pattern.

use es_prometheus_exporter::stats::node_stats::NodeStatsResponse;
use es_prometheus_exporter::stats::{ClusterHealth, ClusterStatsData, IndicesStats, NodeStats};
use es_prometheus_exporter::{Catalog, Collector, ContentType, ExportFilters};

/// Helper to run one full register-and-collect cycle and render the result.
fn collect_to_text(
    cluster_health: &ClusterHealth,
    node_stats: &NodeStats,
    indices_stats: &IndicesStats,
    cluster_stats: &ClusterStatsData,
    filters: &ExportFilters,
) -> String {
    let mut catalog = Catalog::new("testcluster", "node-1", "nodeid-1", "es_");
    let mut collector = Collector::new(&mut catalog, &filters.indices, &filters.settings);
    collector.register_metrics().unwrap();
    collector
        .collect(cluster_health, node_stats, indices_stats, cluster_stats)
        .unwrap();
    catalog.render(ContentType::TextFormat)
}

fn admit_all() -> ExportFilters {
    ExportFilters::from_patterns::<&str>(&[], &[]).unwrap()
}

fn cluster_health_fixture() -> ClusterHealth {
    serde_json::from_str(
        r#"{
            "cluster_name": "testcluster",
            "status": "yellow",
            "timed_out": false,
            "number_of_nodes": 3,
            "number_of_data_nodes": 2,
            "active_primary_shards": 10,
            "active_shards": 18,
            "relocating_shards": 0,
            "initializing_shards": 1,
            "unassigned_shards": 2,
            "delayed_unassigned_shards": 0,
            "number_of_pending_tasks": 4,
            "number_of_in_flight_fetch": 0,
            "task_max_waiting_in_queue_millis": 1500,
            "active_shards_percent_as_number": 85.7
        }"#,
    )
    .unwrap()
}

fn node_stats_fixture() -> NodeStats {
    let response: NodeStatsResponse = serde_json::from_str(
        r#"{
            "cluster_name": "testcluster",
            "nodes": {
                "nodeid-1": {
                    "name": "node-1",
                    "indices": {
                        "docs": {"count": 1200, "deleted": 5},
                        "store": {"size_in_bytes": 52428800},
                        "indexing": {
                            "index_total": 9000,
                            "index_time_in_millis": 4500,
                            "index_current": 1,
                            "index_failed": 2,
                            "is_throttled": false,
                            "throttle_time_in_millis": 0
                        },
                        "search": {
                            "open_contexts": 2,
                            "query_total": 31000,
                            "query_time_in_millis": 62000
                        },
                        "segments": {
                            "count": 12,
                            "memory_in_bytes": 1048576,
                            "terms_memory_in_bytes": 524288
                        }
                    },
                    "jvm": {
                        "uptime_in_millis": 3600000,
                        "mem": {
                            "heap_used_in_bytes": 104857600,
                            "heap_max_in_bytes": 1073741824,
                            "pools": {
                                "young": {"used_in_bytes": 500, "max_in_bytes": 1000},
                                "old": {"used_in_bytes": 700, "max_in_bytes": 2000}
                            }
                        },
                        "threads": {"count": 60, "peak_count": 65},
                        "gc": {
                            "collectors": {
                                "young": {"collection_count": 190, "collection_time_in_millis": 1300}
                            }
                        }
                    },
                    "thread_pool": {
                        "search": {"threads": 7, "queue": 0, "active": 1, "rejected": 3, "largest": 7, "completed": 4100},
                        "write": {"threads": 4, "queue": 2, "active": 0, "rejected": 0, "largest": 4, "completed": 900}
                    },
                    "fs": {
                        "total": {"total_in_bytes": 500000000, "free_in_bytes": 300000000, "available_in_bytes": 280000000},
                        "io_stats": {
                            "total": {"operations": 1000, "read_operations": 400, "write_operations": 600, "read_kilobytes": 2048, "write_kilobytes": 4096}
                        }
                    },
                    "transport": {
                        "server_open": 13,
                        "rx_count": 500, "rx_size_in_bytes": 1000000,
                        "tx_count": 480, "tx_size_in_bytes": 900000
                    },
                    "http": {"current_open": 2, "total_opened": 25},
                    "breakers": {
                        "parent": {"limit_size_in_bytes": 700000, "estimated_size_in_bytes": 12345, "overhead": 1.0, "tripped": 0}
                    },
                    "process": {
                        "open_file_descriptors": 300,
                        "max_file_descriptors": 65536,
                        "cpu": {"percent": 7.0, "total_in_millis": 123000}
                    },
                    "os": {
                        "cpu": {
                            "percent": 12.0,
                            "load_average": {"1m": 0.5, "5m": 0.7, "15m": 0.8}
                        }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    response.into_local_node().unwrap()
}

fn indices_stats_fixture() -> IndicesStats {
    serde_json::from_str(
        r#"{
            "indices": {
                "logs-000001": {
                    "primaries": {"docs": {"count": 42}, "store": {"size_in_bytes": 1000}},
                    "total": {"docs": {"count": 84}, "store": {"size_in_bytes": 2000}}
                },
                "metrics-000001": {
                    "primaries": {"docs": {"count": 7}},
                    "total": {"docs": {"count": 14}}
                },
                "other-000001": {
                    "primaries": {"docs": {"count": 99}},
                    "total": {"docs": {"count": 198}}
                }
            }
        }"#,
    )
    .unwrap()
}

fn cluster_stats_fixture() -> ClusterStatsData {
    let mut stats: ClusterStatsData = serde_json::from_str(
        r#"{
            "cluster_name": "testcluster",
            "indices": {
                "count": 3,
                "shards": {"total": 18, "primaries": 10, "replication": 0.8},
                "docs": {"count": 1348, "deleted": 5},
                "store": {"size_in_bytes": 52431800}
            },
            "nodes": {
                "count": {"total": 3, "data": 2},
                "jvm": {"threads": 120, "mem": {"heap_used_in_bytes": 209715200, "heap_max_in_bytes": 2147483648}},
                "fs": {"total_in_bytes": 1000000000, "free_in_bytes": 600000000, "available_in_bytes": 560000000}
            }
        }"#,
    )
    .unwrap();
    stats.settings.insert(
        "cluster.routing.allocation.enable".to_string(),
        "all".to_string(),
    );
    stats.settings.insert(
        "indices.recovery.max_bytes_per_sec".to_string(),
        "40mb".to_string(),
    );
    stats
}

#[test]
fn test_cluster_health_mapping() {
    let body = collect_to_text(
        &cluster_health_fixture(),
        &NodeStats::default(),
        &IndicesStats::default(),
        &ClusterStatsData::default(),
        &admit_all(),
    );

    assert!(body.contains("es_cluster_status{cluster=\"testcluster\"} 1\n"));
    assert!(body.contains("es_cluster_nodes_number{cluster=\"testcluster\"} 3\n"));
    assert!(body.contains("es_cluster_datanodes_number{cluster=\"testcluster\"} 2\n"));
    assert!(body.contains("es_cluster_shards_number{cluster=\"testcluster\",type=\"active\"} 18\n"));
    assert!(body.contains("es_cluster_shards_number{cluster=\"testcluster\",type=\"unassigned\"} 2\n"));
    assert!(body.contains("es_cluster_pending_tasks_number{cluster=\"testcluster\"} 4\n"));
    assert!(body.contains("es_cluster_task_max_waiting_time_seconds{cluster=\"testcluster\"} 1.5\n"));
    assert!(body.contains("es_cluster_is_timedout_bool{cluster=\"testcluster\"} 0\n"));
    assert!(body.contains("es_cluster_shards_active_percent{cluster=\"testcluster\"} 85.7\n"));
}

#[test]
fn test_node_stats_mapping_carries_node_identity_labels() {
    let body = collect_to_text(
        &ClusterHealth::default(),
        &node_stats_fixture(),
        &IndicesStats::default(),
        &ClusterStatsData::default(),
        &admit_all(),
    );

    let node_labels = "cluster=\"testcluster\",node=\"node-1\",nodeid=\"nodeid-1\"";

    assert!(body.contains(&format!("es_indices_doc_number{{{}}} 1200\n", node_labels)));
    assert!(body.contains(&format!("es_jvm_mem_heap_used_bytes{{{}}} 104857600\n", node_labels)));
    assert!(body.contains(&format!("es_jvm_uptime_seconds{{{}}} 3600\n", node_labels)));
    assert!(body.contains(&format!(
        "es_jvm_mem_pool_used_bytes{{{},pool=\"old\"}} 700\n",
        node_labels
    )));
    assert!(body.contains(&format!(
        "es_jvm_gc_collection_time_seconds{{{},gc=\"young\"}} 1.3\n",
        node_labels
    )));
    assert!(body.contains(&format!(
        "es_threadpool_threads_count{{{},name=\"search\",type=\"rejected\"}} 3\n",
        node_labels
    )));
    assert!(body.contains(&format!(
        "es_threadpool_tasks_number{{{},name=\"write\",type=\"queue\"}} 2\n",
        node_labels
    )));
    assert!(body.contains(&format!("es_transport_rx_bytes_count{{{}}} 1000000\n", node_labels)));
    assert!(body.contains(&format!("es_http_open_server_number{{{}}} 2\n", node_labels)));
    assert!(body.contains(&format!(
        "es_circuitbreaker_estimated_bytes{{{},name=\"parent\"}} 12345\n",
        node_labels
    )));
    assert!(body.contains(&format!("es_process_cpu_time_seconds{{{}}} 123\n", node_labels)));
    assert!(body.contains(&format!(
        "es_os_load_average{{{},avg=\"5m\"}} 0.7\n",
        node_labels
    )));
    // fs io kilobyte counters are converted to bytes
    assert!(body.contains(&format!("es_fs_io_total_read_bytes{{{}}} 2097152\n", node_labels)));
    assert!(body.contains(&format!(
        "es_indices_segments_memory_bytes{{{},type=\"terms\"}} 524288\n",
        node_labels
    )));
}

#[test]
fn test_missing_leaves_are_skipped_not_zeroed() {
    let node = node_stats_fixture();
    let body = collect_to_text(
        &ClusterHealth::default(),
        &node,
        &IndicesStats::default(),
        &ClusterStatsData::default(),
        &admit_all(),
    );

    // The fixture has no os.mem section and no ingest section at all:
    // neither may appear, not even as zero.
    assert!(!body.contains("es_os_mem_total_bytes"));
    assert!(!body.contains("es_ingest_total_count"));
    // delete_total is absent inside the indexing section.
    assert!(!body.contains("es_indices_indexing_delete_count"));
}

#[test]
fn test_index_filter_admits_subset_regardless_of_source_order() {
    let filters = ExportFilters::from_patterns(&["logs-*", "metrics-*"], &[]).unwrap();
    let body = collect_to_text(
        &ClusterHealth::default(),
        &NodeStats::default(),
        &indices_stats_fixture(),
        &ClusterStatsData::default(),
        &filters,
    );

    assert!(body.contains("index=\"logs-000001\""));
    assert!(body.contains("index=\"metrics-000001\""));
    // The filtered-out index contributes zero samples, not zero-valued ones.
    assert!(!body.contains("other-000001"));
}

#[test]
fn test_index_context_label_covers_primaries_and_total() {
    let body = collect_to_text(
        &ClusterHealth::default(),
        &NodeStats::default(),
        &indices_stats_fixture(),
        &ClusterStatsData::default(),
        &admit_all(),
    );

    assert!(body.contains(
        "es_index_doc_number{cluster=\"testcluster\",index=\"logs-000001\",context=\"primaries\"} 42\n"
    ));
    assert!(body.contains(
        "es_index_doc_number{cluster=\"testcluster\",index=\"logs-000001\",context=\"total\"} 84\n"
    ));
    assert!(body.contains(
        "es_index_store_size_bytes{cluster=\"testcluster\",index=\"logs-000001\",context=\"primaries\"} 1000\n"
    ));
}

#[test]
fn test_cluster_stats_mapping() {
    let body = collect_to_text(
        &ClusterHealth::default(),
        &NodeStats::default(),
        &IndicesStats::default(),
        &cluster_stats_fixture(),
        &admit_all(),
    );

    assert!(body.contains("es_clusterstats_indices_number{cluster=\"testcluster\"} 3\n"));
    assert!(body.contains("es_clusterstats_shards_number{cluster=\"testcluster\",type=\"total\"} 18\n"));
    assert!(body.contains("es_clusterstats_docs_number{cluster=\"testcluster\"} 1348\n"));
    assert!(body.contains("es_clusterstats_nodes_number{cluster=\"testcluster\",role=\"data\"} 2\n"));
    assert!(body.contains("es_clusterstats_jvm_heap_used_bytes{cluster=\"testcluster\"} 209715200\n"));
    assert!(body.contains("es_clusterstats_fs_available_bytes{cluster=\"testcluster\"} 560000000\n"));
}

#[test]
fn test_settings_exposure_is_opt_in_and_filtered() {
    // No settings patterns configured: nothing is exposed.
    let body = collect_to_text(
        &ClusterHealth::default(),
        &NodeStats::default(),
        &IndicesStats::default(),
        &cluster_stats_fixture(),
        &admit_all(),
    );
    assert!(!body.contains("es_cluster_settings_info"));

    // A pattern admits only the routing settings.
    let filters = ExportFilters::from_patterns(&[], &["cluster.routing.*"]).unwrap();
    let body = collect_to_text(
        &ClusterHealth::default(),
        &NodeStats::default(),
        &IndicesStats::default(),
        &cluster_stats_fixture(),
        &filters,
    );
    assert!(body.contains(
        "es_cluster_settings_info{cluster=\"testcluster\",setting=\"cluster.routing.allocation.enable\",value=\"all\"} 1\n"
    ));
    assert!(!body.contains("indices.recovery.max_bytes_per_sec"));
}

#[test]
fn test_collect_twice_renders_identical_documents() {
    let filters = admit_all();
    let health = cluster_health_fixture();
    let node = node_stats_fixture();
    let indices = indices_stats_fixture();
    let cluster = cluster_stats_fixture();

    let first = collect_to_text(&health, &node, &indices, &cluster, &filters);
    let second = collect_to_text(&health, &node, &indices, &cluster, &filters);
    assert_eq!(first, second);
}
