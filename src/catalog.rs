//! Per-scrape metric catalog.
//!
//! A `Catalog` holds the metric definitions and the sample values for
//! exactly one scrape, then renders itself to exposition text. It is
//! created fresh per request and never shared, so nothing in here needs
//! locking. Rendering is deterministic: definitions appear in
//! registration order, samples in the insertion order of their first
//! `record` call, which keeps successive documents diffable.

use ahash::AHashMap as HashMap;
use std::fmt::Write;

use crate::error::CatalogError;
use crate::exposition::ContentType;

/// Metric type in the exposition sense.
///
/// Counters in this exporter carry point-in-time cumulative totals read
/// from the source stats, not locally accumulated deltas. That is why
/// `record` is last-write-wins rather than additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
}

impl MetricType {
    fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
        }
    }
}

/// One recorded sample: a concrete label-value tuple and its value.
#[derive(Debug, Clone)]
struct Sample {
    label_values: Vec<String>,
    value: f64,
}

/// One registered metric: identity, shape, and its samples for this scrape.
#[derive(Debug)]
struct Definition {
    name: String,
    help: String,
    metric_type: MetricType,
    label_names: Vec<String>,
    /// Samples in insertion order of their first record call.
    samples: Vec<Sample>,
    /// Label-tuple -> index into `samples`, for last-write-wins dedup.
    by_key: HashMap<Vec<String>, usize>,
}

/// Registry of metric definitions and samples for a single scrape.
pub struct Catalog {
    cluster_name: String,
    node_name: String,
    node_id: String,
    prefix: String,
    /// Definitions in registration order.
    definitions: Vec<Definition>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Creates a catalog scoped to one scrape.
    ///
    /// The identity fields feed the standard label columns (`cluster` on
    /// every metric, `node`/`nodeid` on node-scoped metrics); the prefix
    /// is prepended to every metric name at registration.
    pub fn new(cluster_name: &str, node_name: &str, node_id: &str, prefix: &str) -> Self {
        Self {
            cluster_name: cluster_name.to_string(),
            node_name: node_name.to_string(),
            node_id: node_id.to_string(),
            prefix: prefix.to_string(),
            definitions: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Registers a metric definition under `prefix + name`.
    ///
    /// Idempotent when the existing definition has the same type and
    /// label names; fails with `DuplicateDefinition` otherwise.
    pub fn register(
        &mut self,
        name: &str,
        metric_type: MetricType,
        help: &str,
        label_names: &[&str],
    ) -> Result<(), CatalogError> {
        let full_name = format!("{}{}", self.prefix, name);

        if let Some(&idx) = self.by_name.get(&full_name) {
            let existing = &self.definitions[idx];
            if existing.metric_type == metric_type && existing.label_names == label_names {
                return Ok(());
            }
            return Err(CatalogError::DuplicateDefinition(full_name));
        }

        self.by_name.insert(full_name.clone(), self.definitions.len());
        self.definitions.push(Definition {
            name: full_name,
            help: help.to_string(),
            metric_type,
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            samples: Vec::new(),
            by_key: HashMap::new(),
        });

        Ok(())
    }

    /// Records one sample. Overwrites any prior sample with the same
    /// label-value tuple (last-write-wins).
    pub fn record(
        &mut self,
        name: &str,
        label_values: &[&str],
        value: f64,
    ) -> Result<(), CatalogError> {
        let full_name = format!("{}{}", self.prefix, name);

        let idx = *self
            .by_name
            .get(&full_name)
            .ok_or_else(|| CatalogError::UnknownMetric(full_name.clone()))?;
        let definition = &mut self.definitions[idx];

        if label_values.len() != definition.label_names.len() {
            return Err(CatalogError::LabelArityMismatch {
                name: full_name,
                expected: definition.label_names.len(),
                got: label_values.len(),
            });
        }

        let key: Vec<String> = label_values.iter().map(|v| v.to_string()).collect();
        match definition.by_key.get(&key) {
            Some(&sample_idx) => definition.samples[sample_idx].value = value,
            None => {
                definition.by_key.insert(key.clone(), definition.samples.len());
                definition.samples.push(Sample {
                    label_values: key,
                    value,
                });
            }
        }

        Ok(())
    }

    // Convenience registration surface mirroring the label scheme of the
    // original catalog: every metric carries `cluster`, node-scoped
    // metrics additionally `node` and `nodeid`.

    pub fn register_cluster_gauge(
        &mut self,
        name: &str,
        help: &str,
        extra_labels: &[&str],
    ) -> Result<(), CatalogError> {
        self.register_with_identity(name, MetricType::Gauge, help, &["cluster"], extra_labels)
    }

    pub fn register_cluster_counter(
        &mut self,
        name: &str,
        help: &str,
        extra_labels: &[&str],
    ) -> Result<(), CatalogError> {
        self.register_with_identity(name, MetricType::Counter, help, &["cluster"], extra_labels)
    }

    pub fn register_node_gauge(
        &mut self,
        name: &str,
        help: &str,
        extra_labels: &[&str],
    ) -> Result<(), CatalogError> {
        self.register_with_identity(
            name,
            MetricType::Gauge,
            help,
            &["cluster", "node", "nodeid"],
            extra_labels,
        )
    }

    pub fn register_node_counter(
        &mut self,
        name: &str,
        help: &str,
        extra_labels: &[&str],
    ) -> Result<(), CatalogError> {
        self.register_with_identity(
            name,
            MetricType::Counter,
            help,
            &["cluster", "node", "nodeid"],
            extra_labels,
        )
    }

    fn register_with_identity(
        &mut self,
        name: &str,
        metric_type: MetricType,
        help: &str,
        identity_labels: &[&str],
        extra_labels: &[&str],
    ) -> Result<(), CatalogError> {
        let mut labels: Vec<&str> = Vec::with_capacity(identity_labels.len() + extra_labels.len());
        labels.extend_from_slice(identity_labels);
        labels.extend_from_slice(extra_labels);
        self.register(name, metric_type, help, &labels)
    }

    /// Records a cluster-scoped sample, filling the `cluster` label.
    pub fn record_cluster(
        &mut self,
        name: &str,
        value: f64,
        extra_values: &[&str],
    ) -> Result<(), CatalogError> {
        let cluster = self.cluster_name.clone();
        let mut values: Vec<&str> = Vec::with_capacity(1 + extra_values.len());
        values.push(&cluster);
        values.extend_from_slice(extra_values);
        self.record(name, &values, value)
    }

    /// Records a node-scoped sample, filling `cluster`, `node`, `nodeid`.
    pub fn record_node(
        &mut self,
        name: &str,
        value: f64,
        extra_values: &[&str],
    ) -> Result<(), CatalogError> {
        let cluster = self.cluster_name.clone();
        let node = self.node_name.clone();
        let node_id = self.node_id.clone();
        let mut values: Vec<&str> = Vec::with_capacity(3 + extra_values.len());
        values.push(&cluster);
        values.push(&node);
        values.push(&node_id);
        values.extend_from_slice(extra_values);
        self.record(name, &values, value)
    }

    /// Renders the full exposition document in one pass.
    ///
    /// Definitions with zero recorded samples are omitted entirely, HELP
    /// and TYPE lines included. Output is byte-identical across repeated
    /// calls on the same catalog.
    pub fn render(&self, content_type: ContentType) -> String {
        let mut out = String::with_capacity(16 * 1024);

        for definition in &self.definitions {
            if definition.samples.is_empty() {
                continue;
            }

            match content_type {
                ContentType::TextFormat => {
                    let _ = writeln!(
                        out,
                        "# HELP {} {}",
                        definition.name,
                        escape_help(&definition.help)
                    );
                    let _ = writeln!(
                        out,
                        "# TYPE {} {}",
                        definition.name,
                        definition.metric_type.as_str()
                    );
                }
                ContentType::OpenMetrics => {
                    let _ = writeln!(
                        out,
                        "# TYPE {} {}",
                        definition.name,
                        definition.metric_type.as_str()
                    );
                    let _ = writeln!(
                        out,
                        "# HELP {} {}",
                        definition.name,
                        escape_help(&definition.help)
                    );
                }
            }

            let line_name = sample_name(definition, content_type);
            for sample in &definition.samples {
                write_sample(&mut out, &line_name, definition, sample);
            }
        }

        if content_type == ContentType::OpenMetrics {
            out.push_str("# EOF\n");
        }

        out
    }
}

/// OpenMetrics requires counter samples to carry the `_total` suffix;
/// HELP/TYPE lines keep the base name.
fn sample_name(definition: &Definition, content_type: ContentType) -> String {
    match (content_type, definition.metric_type) {
        (ContentType::OpenMetrics, MetricType::Counter)
            if !definition.name.ends_with("_total") =>
        {
            format!("{}_total", definition.name)
        }
        _ => definition.name.clone(),
    }
}

fn write_sample(out: &mut String, name: &str, definition: &Definition, sample: &Sample) {
    out.push_str(name);

    if !definition.label_names.is_empty() {
        out.push('{');
        for (i, (label, value)) in definition
            .label_names
            .iter()
            .zip(&sample.label_values)
            .enumerate()
        {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", label, escape_label_value(value));
        }
        out.push('}');
    }

    out.push(' ');
    out.push_str(&format_value(sample.value));
    out.push('\n');
}

/// Deterministic value formatting: integral values without a decimal
/// point, everything else via the shortest round-trip float form.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
