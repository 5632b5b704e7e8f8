//! Integration tests for the metric catalog.
//!
//! These tests verify the rendering contract: registration-order output,
//! sample de-duplication, omission of unpopulated metrics, and the
//! differences between the text format and OpenMetrics encodings.

use es_prometheus_exporter::{Catalog, CatalogError, ContentType, MetricType};

/// Helper function to create a catalog with fixed identity fields.
fn catalog() -> Catalog {
    Catalog::new("testcluster", "node-1", "nodeid-1", "es_")
}

#[test]
fn test_exactly_one_line_per_label_tuple() {
    let mut c = catalog();
    c.register("shards", MetricType::Gauge, "Shards by state", &["type"])
        .unwrap();

    c.record("shards", &["active"], 4.0).unwrap();
    c.record("shards", &["unassigned"], 1.0).unwrap();
    // Same key recorded again: last value must win, no duplicate line.
    c.record("shards", &["active"], 6.0).unwrap();
    c.record("shards", &["active"], 5.0).unwrap();

    let body = c.render(ContentType::TextFormat);
    let data_lines: Vec<&str> = body
        .lines()
        .filter(|l| !l.starts_with('#') && !l.is_empty())
        .collect();

    assert_eq!(data_lines.len(), 2);
    assert!(body.contains("es_shards{type=\"active\"} 5\n"));
    assert!(body.contains("es_shards{type=\"unassigned\"} 1\n"));
}

#[test]
fn test_reregistration_identical_is_noop() {
    let mut c = catalog();
    c.register("x", MetricType::Counter, "help", &["a", "b"]).unwrap();
    c.register("x", MetricType::Counter, "help", &["a", "b"]).unwrap();

    c.record("x", &["1", "2"], 3.0).unwrap();
    let body = c.render(ContentType::TextFormat);
    assert_eq!(body.matches("# TYPE es_x counter").count(), 1);
}

#[test]
fn test_reregistration_different_shape_fails() {
    let mut c = catalog();
    c.register("x", MetricType::Counter, "help", &["a"]).unwrap();

    assert!(matches!(
        c.register("x", MetricType::Gauge, "help", &["a"]),
        Err(CatalogError::DuplicateDefinition(_))
    ));
    assert!(matches!(
        c.register("x", MetricType::Counter, "help", &["a", "b"]),
        Err(CatalogError::DuplicateDefinition(_))
    ));
}

#[test]
fn test_zero_sample_metrics_fully_absent() {
    let mut c = catalog();
    c.register("populated", MetricType::Gauge, "help", &[]).unwrap();
    c.register("empty", MetricType::Gauge, "help", &[]).unwrap();
    c.record("populated", &[], 1.0).unwrap();

    for content_type in [ContentType::TextFormat, ContentType::OpenMetrics] {
        let body = c.render(content_type);
        // No header-only rows: neither HELP, TYPE nor data lines appear.
        assert!(!body.contains("es_empty"));
        assert!(body.contains("es_populated"));
    }
}

#[test]
fn test_render_idempotence_byte_identical() {
    let mut c = catalog();
    c.register("a", MetricType::Gauge, "help a", &["l"]).unwrap();
    c.register("b", MetricType::Counter, "help b", &[]).unwrap();
    c.record("a", &["x"], 0.25).unwrap();
    c.record("a", &["y"], 104857600.0).unwrap();
    c.record("b", &[], 9.0).unwrap();

    let first = c.render(ContentType::TextFormat);
    let second = c.render(ContentType::TextFormat);
    assert_eq!(first, second);

    let om_first = c.render(ContentType::OpenMetrics);
    let om_second = c.render(ContentType::OpenMetrics);
    assert_eq!(om_first, om_second);
}

#[test]
fn test_text_format_full_document_shape() {
    let mut c = catalog();
    c.register("cluster_status", MetricType::Gauge, "Cluster status", &["cluster"])
        .unwrap();
    c.record("cluster_status", &["testcluster"], 0.0).unwrap();

    let body = c.render(ContentType::TextFormat);
    assert_eq!(
        body,
        "# HELP es_cluster_status Cluster status\n\
         # TYPE es_cluster_status gauge\n\
         es_cluster_status{cluster=\"testcluster\"} 0\n"
    );
}

#[test]
fn test_openmetrics_document_shape() {
    let mut c = catalog();
    c.register("requests", MetricType::Counter, "Requests", &[]).unwrap();
    c.record("requests", &[], 3.0).unwrap();

    let body = c.render(ContentType::OpenMetrics);
    assert_eq!(
        body,
        "# TYPE es_requests counter\n\
         # HELP es_requests Requests\n\
         es_requests_total 3\n\
         # EOF\n"
    );
}

#[test]
fn test_openmetrics_counter_already_suffixed() {
    let mut c = catalog();
    c.register("ops_total", MetricType::Counter, "Ops", &[]).unwrap();
    c.record("ops_total", &[], 1.0).unwrap();

    let body = c.render(ContentType::OpenMetrics);
    // No double suffix.
    assert!(body.contains("es_ops_total 1\n"));
    assert!(!body.contains("es_ops_total_total"));
}

#[test]
fn test_empty_catalog_renders_empty_document() {
    let c = catalog();
    assert_eq!(c.render(ContentType::TextFormat), "");
    assert_eq!(c.render(ContentType::OpenMetrics), "# EOF\n");
}
