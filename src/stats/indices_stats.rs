//! Per-index statistics (`GET /_all/_stats`).

use std::collections::BTreeMap;

use serde::Deserialize;

use super::common::IndicesStatsSummary;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicesStats {
    /// Aggregate over all indices; present but unused by the collector,
    /// which derives cluster-wide numbers from the cluster stats instead.
    #[serde(rename = "_all")]
    pub all: Option<IndexStats>,
    #[serde(default)]
    pub indices: BTreeMap<String, IndexStats>,
}

/// Stats for one index, split into primary shards only and all shards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexStats {
    pub primaries: Option<IndicesStatsSummary>,
    pub total: Option<IndicesStatsSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_indices_map() {
        let stats: IndicesStats = serde_json::from_str(
            r#"{
                "_all": {"total": {"docs": {"count": 52}}},
                "indices": {
                    "logs-000001": {
                        "primaries": {"docs": {"count": 42}},
                        "total": {"docs": {"count": 42}}
                    }
                }
            }"#,
        )
        .unwrap();

        let index = stats.indices.get("logs-000001").unwrap();
        let primaries = index.primaries.as_ref().unwrap();
        assert_eq!(primaries.docs.as_ref().unwrap().count, Some(42));
    }
}
