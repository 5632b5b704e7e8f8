//! End-to-end tests for the scrape entry point: content negotiation plus
//! the full collection-and-render cycle over realistic input documents.

use es_prometheus_exporter::stats::node_stats::NodeStatsResponse;
use es_prometheus_exporter::stats::{ClusterHealth, ClusterStatsData, IndicesStats, NodeStats};
use es_prometheus_exporter::{handle_scrape, ContentType, ExportFilters};

fn cluster_health() -> ClusterHealth {
    serde_json::from_str(r#"{"cluster_name": "prod-cluster", "status": "green"}"#).unwrap()
}

fn node_stats() -> NodeStats {
    let response: NodeStatsResponse = serde_json::from_str(
        r#"{
            "nodes": {
                "u4Qw9yAnTzqWqV1gXhYDbg": {
                    "name": "es-data-0",
                    "jvm": {"mem": {"heap_used_in_bytes": 104857600}}
                }
            }
        }"#,
    )
    .unwrap();
    response.into_local_node().unwrap()
}

fn indices_stats() -> IndicesStats {
    serde_json::from_str(
        r#"{
            "indices": {
                "other-000001": {
                    "primaries": {"docs": {"count": 7}},
                    "total": {"docs": {"count": 7}}
                },
                "logs-000001": {
                    "primaries": {"docs": {"count": 42}},
                    "total": {"docs": {"count": 42}}
                }
            }
        }"#,
    )
    .unwrap()
}

fn scrape(accept: Option<&str>) -> (ContentType, String) {
    let filters = ExportFilters::from_patterns(&["logs-*"], &[]).unwrap();
    let output = handle_scrape(
        accept,
        &cluster_health(),
        &node_stats(),
        &indices_stats(),
        &ClusterStatsData::default(),
        &filters,
        "es_",
    )
    .unwrap();
    (output.content_type, output.body)
}

#[test]
fn test_end_to_end_scenario() {
    let (content_type, body) = scrape(None);

    assert_eq!(content_type, ContentType::TextFormat);

    // green maps to 0
    assert!(body.contains("es_cluster_status{cluster=\"prod-cluster\"} 0\n"));

    // node identity comes from the node stats response
    assert!(body.contains(
        "es_jvm_mem_heap_used_bytes{cluster=\"prod-cluster\",node=\"es-data-0\",\
         nodeid=\"u4Qw9yAnTzqWqV1gXhYDbg\"} 104857600\n"
    ));

    // the admitted index is present with its doc count...
    assert!(body.contains(
        "es_index_doc_number{cluster=\"prod-cluster\",index=\"logs-000001\",context=\"primaries\"} 42\n"
    ));
    // ...and the filtered-out index contributes no lines at all
    assert!(!body.contains("other-000001"));
}

#[test]
fn test_negotiation_selects_openmetrics() {
    let (content_type, body) =
        scrape(Some("application/openmetrics-text; version=1.0.0; charset=utf-8"));

    assert_eq!(content_type, ContentType::OpenMetrics);
    assert_eq!(
        content_type.as_str(),
        "application/openmetrics-text; version=1.0.0; charset=utf-8"
    );
    assert!(body.ends_with("# EOF\n"));
}

#[test]
fn test_negotiation_falls_back_to_text_format() {
    for accept in [None, Some(""), Some("*/*"), Some("text/html")] {
        let (content_type, body) = scrape(accept);
        assert_eq!(content_type, ContentType::TextFormat);
        assert_eq!(
            content_type.as_str(),
            "text/plain; version=0.0.4; charset=utf-8"
        );
        assert!(!body.contains("# EOF"));
    }
}

#[test]
fn test_scrape_with_empty_aggregates_produces_empty_but_valid_document() {
    let filters = ExportFilters::from_patterns::<&str>(&[], &[]).unwrap();
    let output = handle_scrape(
        None,
        &ClusterHealth::default(),
        &NodeStats::default(),
        &IndicesStats::default(),
        &ClusterStatsData::default(),
        &filters,
        "es_",
    )
    .unwrap();

    // Nothing was recorded, so nothing is rendered (no synthetic zeros).
    assert_eq!(output.body, "");
}

#[test]
fn test_scrape_output_is_stable_across_calls() {
    let (_, first) = scrape(None);
    let (_, second) = scrape(None);
    assert_eq!(first, second);
}
