//! Elasticsearch statistics source.
//!
//! This module obtains the four statistics aggregates the collector
//! consumes, plus the flat cluster settings document. Any failure here
//! (connection, non-2xx status, body decode) is surfaced as a
//! `SourceUnavailable` request failure; the exporter never emits a
//! partial document.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use es_prometheus_exporter::stats::node_stats::NodeStatsResponse;
use es_prometheus_exporter::stats::{ClusterHealth, ClusterStatsData, IndicesStats, NodeStats};
use es_prometheus_exporter::ExportError;

/// HTTP client for one Elasticsearch base URL.
#[derive(Debug, Clone)]
pub struct EsClient {
    http: reqwest::Client,
    base_url: String,
}

/// Shape of `GET /_cluster/settings?flat_settings=true&include_defaults=true`.
#[derive(Debug, Default, Deserialize)]
struct ClusterSettingsResponse {
    #[serde(default)]
    defaults: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    persistent: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    transient: BTreeMap<String, serde_json::Value>,
}

impl EsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        aggregate: &'static str,
    ) -> Result<T, ExportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ExportError::source_unavailable(aggregate, &e))?
            .error_for_status()
            .map_err(|e| ExportError::source_unavailable(aggregate, &e))?;

        response
            .json()
            .await
            .map_err(|e| ExportError::source_unavailable(aggregate, &e))
    }

    pub async fn cluster_health(&self) -> Result<ClusterHealth, ExportError> {
        self.get_json("/_cluster/health", "cluster health").await
    }

    /// Stats of the node answering the request, id stamped from the
    /// response map key.
    pub async fn local_node_stats(&self) -> Result<NodeStats, ExportError> {
        let response: NodeStatsResponse = self.get_json("/_nodes/_local/stats", "node stats").await?;
        response.into_local_node().ok_or_else(|| {
            ExportError::source_unavailable("node stats", "response contained no node entry")
        })
    }

    pub async fn indices_stats(&self) -> Result<IndicesStats, ExportError> {
        self.get_json("/_all/_stats", "indices stats").await
    }

    /// Cluster-wide stats with the flat settings document folded in.
    pub async fn cluster_stats(&self) -> Result<ClusterStatsData, ExportError> {
        let mut stats: ClusterStatsData = self.get_json("/_cluster/stats", "cluster stats").await?;

        let settings: ClusterSettingsResponse = self
            .get_json(
                "/_cluster/settings?flat_settings=true&include_defaults=true",
                "cluster stats",
            )
            .await?;
        stats.settings = flatten_settings(settings);

        Ok(stats)
    }

    /// Cheap reachability probe for the /health endpoint.
    pub async fn ping(&self) -> bool {
        self.cluster_health().await.is_ok()
    }
}

/// Merges the three settings scopes into one flat map. Transient settings
/// override persistent ones, which override defaults, matching how
/// Elasticsearch applies them.
fn flatten_settings(response: ClusterSettingsResponse) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    for scope in [response.defaults, response.persistent, response.transient] {
        for (key, value) in scope {
            flat.insert(key, stringify_setting(&value));
        }
    }
    flat
}

fn stringify_setting(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_settings_precedence() {
        let response = ClusterSettingsResponse {
            defaults: BTreeMap::from([(
                "cluster.routing.allocation.enable".to_string(),
                json!("all"),
            )]),
            persistent: BTreeMap::from([(
                "cluster.routing.allocation.enable".to_string(),
                json!("primaries"),
            )]),
            transient: BTreeMap::new(),
        };

        let flat = flatten_settings(response);
        assert_eq!(
            flat.get("cluster.routing.allocation.enable").map(String::as_str),
            Some("primaries")
        );
    }

    #[test]
    fn test_stringify_setting_non_string_values() {
        assert_eq!(stringify_setting(&json!(true)), "true");
        assert_eq!(stringify_setting(&json!(5)), "5");
        assert_eq!(stringify_setting(&json!(["a", "b"])), r#"["a","b"]"#);
    }
}
