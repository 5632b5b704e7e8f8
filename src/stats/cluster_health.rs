//! Cluster health aggregate (`GET /_cluster/health`).

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterHealth {
    #[serde(default)]
    pub cluster_name: String,
    pub status: Option<String>,
    pub timed_out: Option<bool>,
    pub number_of_nodes: Option<u64>,
    pub number_of_data_nodes: Option<u64>,
    pub active_primary_shards: Option<u64>,
    pub active_shards: Option<u64>,
    pub relocating_shards: Option<u64>,
    pub initializing_shards: Option<u64>,
    pub unassigned_shards: Option<u64>,
    pub delayed_unassigned_shards: Option<u64>,
    pub number_of_pending_tasks: Option<u64>,
    pub number_of_in_flight_fetch: Option<u64>,
    pub task_max_waiting_in_queue_millis: Option<u64>,
    pub active_shards_percent_as_number: Option<f64>,
}

/// Numeric encoding of the cluster status, matching the health status
/// ordinals the source reports: green=0, yellow=1, red=2. Unknown status
/// strings yield no sample.
pub fn status_value(status: &str) -> Option<f64> {
    match status {
        "green" => Some(0.0),
        "yellow" => Some(1.0),
        "red" => Some(2.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_value("green"), Some(0.0));
        assert_eq!(status_value("yellow"), Some(1.0));
        assert_eq!(status_value("red"), Some(2.0));
        assert_eq!(status_value("purple"), None);
    }

    #[test]
    fn test_deserialize_partial_document() {
        let health: ClusterHealth = serde_json::from_str(
            r#"{"cluster_name":"c1","status":"green","active_shards":10}"#,
        )
        .unwrap();
        assert_eq!(health.cluster_name, "c1");
        assert_eq!(health.status.as_deref(), Some("green"));
        assert_eq!(health.active_shards, Some(10));
        assert_eq!(health.unassigned_shards, None);
    }
}
