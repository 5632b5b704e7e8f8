//! Local node statistics (`GET /_nodes/_local/stats`).

use std::collections::BTreeMap;

use serde::Deserialize;

use super::common::IndicesStatsSummary;

/// Top-level response shape: one entry per node, keyed by node id. The
/// local-stats call returns exactly one entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStatsResponse {
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeStats>,
}

impl NodeStatsResponse {
    /// Extracts the single node entry, stamping the map key into the
    /// stats as the node id.
    pub fn into_local_node(self) -> Option<NodeStats> {
        self.nodes.into_iter().next().map(|(id, mut stats)| {
            stats.id = id;
            stats
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStats {
    /// Node id, stamped from the response map key (not part of the JSON body).
    #[serde(skip)]
    pub id: String,
    pub name: Option<String>,
    pub indices: Option<IndicesStatsSummary>,
    pub os: Option<OsStats>,
    pub process: Option<ProcessStats>,
    pub jvm: Option<JvmStats>,
    #[serde(default)]
    pub thread_pool: BTreeMap<String, ThreadPoolStats>,
    pub fs: Option<FsStats>,
    pub transport: Option<TransportStats>,
    pub http: Option<HttpStats>,
    #[serde(default)]
    pub breakers: BTreeMap<String, BreakerStats>,
    pub script: Option<ScriptStats>,
    pub ingest: Option<IngestStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsStats {
    pub cpu: Option<OsCpuStats>,
    pub mem: Option<OsMemStats>,
    pub swap: Option<OsSwapStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsCpuStats {
    pub percent: Option<f64>,
    pub load_average: Option<LoadAverage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadAverage {
    #[serde(rename = "1m")]
    pub one_minute: Option<f64>,
    #[serde(rename = "5m")]
    pub five_minutes: Option<f64>,
    #[serde(rename = "15m")]
    pub fifteen_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsMemStats {
    pub total_in_bytes: Option<u64>,
    pub free_in_bytes: Option<u64>,
    pub used_in_bytes: Option<u64>,
    pub free_percent: Option<f64>,
    pub used_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsSwapStats {
    pub total_in_bytes: Option<u64>,
    pub free_in_bytes: Option<u64>,
    pub used_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessStats {
    pub open_file_descriptors: Option<u64>,
    pub max_file_descriptors: Option<u64>,
    pub cpu: Option<ProcessCpuStats>,
    pub mem: Option<ProcessMemStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessCpuStats {
    pub percent: Option<f64>,
    pub total_in_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessMemStats {
    pub total_virtual_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmStats {
    pub uptime_in_millis: Option<u64>,
    pub mem: Option<JvmMemStats>,
    pub threads: Option<JvmThreadsStats>,
    pub gc: Option<JvmGcStats>,
    #[serde(default)]
    pub buffer_pools: BTreeMap<String, JvmBufferPoolStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmMemStats {
    pub heap_used_in_bytes: Option<u64>,
    pub heap_used_percent: Option<f64>,
    pub heap_committed_in_bytes: Option<u64>,
    pub heap_max_in_bytes: Option<u64>,
    pub non_heap_used_in_bytes: Option<u64>,
    pub non_heap_committed_in_bytes: Option<u64>,
    #[serde(default)]
    pub pools: BTreeMap<String, JvmMemPoolStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmMemPoolStats {
    pub used_in_bytes: Option<u64>,
    pub max_in_bytes: Option<u64>,
    pub peak_used_in_bytes: Option<u64>,
    pub peak_max_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmThreadsStats {
    pub count: Option<u64>,
    pub peak_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmGcStats {
    #[serde(default)]
    pub collectors: BTreeMap<String, JvmGcCollectorStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmGcCollectorStats {
    pub collection_count: Option<u64>,
    pub collection_time_in_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JvmBufferPoolStats {
    pub count: Option<u64>,
    pub used_in_bytes: Option<u64>,
    pub total_capacity_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadPoolStats {
    pub threads: Option<u64>,
    pub queue: Option<u64>,
    pub active: Option<u64>,
    pub rejected: Option<u64>,
    pub largest: Option<u64>,
    pub completed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FsStats {
    pub total: Option<FsEntry>,
    #[serde(default)]
    pub data: Vec<FsDataEntry>,
    pub io_stats: Option<FsIoStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FsEntry {
    pub total_in_bytes: Option<u64>,
    pub free_in_bytes: Option<u64>,
    pub available_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FsDataEntry {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub mount: String,
    #[serde(rename = "type", default)]
    pub filesystem_type: String,
    pub total_in_bytes: Option<u64>,
    pub free_in_bytes: Option<u64>,
    pub available_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FsIoStats {
    pub total: Option<FsIoTotals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FsIoTotals {
    pub operations: Option<u64>,
    pub read_operations: Option<u64>,
    pub write_operations: Option<u64>,
    pub read_kilobytes: Option<u64>,
    pub write_kilobytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportStats {
    pub server_open: Option<u64>,
    pub rx_count: Option<u64>,
    pub rx_size_in_bytes: Option<u64>,
    pub tx_count: Option<u64>,
    pub tx_size_in_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpStats {
    pub current_open: Option<u64>,
    pub total_opened: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreakerStats {
    pub limit_size_in_bytes: Option<u64>,
    pub estimated_size_in_bytes: Option<u64>,
    pub overhead: Option<f64>,
    pub tripped: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptStats {
    pub compilations: Option<u64>,
    pub cache_evictions: Option<u64>,
    pub compilation_limit_triggered: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestStats {
    pub total: Option<IngestTotals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestTotals {
    pub count: Option<u64>,
    pub time_in_millis: Option<u64>,
    pub current: Option<u64>,
    pub failed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_local_node_stamps_id() {
        let response: NodeStatsResponse = serde_json::from_str(
            r#"{"cluster_name":"c1","nodes":{"abc123":{"name":"node-1"}}}"#,
        )
        .unwrap();
        let node = response.into_local_node().unwrap();
        assert_eq!(node.id, "abc123");
        assert_eq!(node.name.as_deref(), Some("node-1"));
    }

    #[test]
    fn test_into_local_node_empty_response() {
        let response = NodeStatsResponse::default();
        assert!(response.into_local_node().is_none());
    }
}
