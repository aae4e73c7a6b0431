//! Consolidation types.

use serde::Serialize;

/// Result of a prune pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PruneReport {
    #[serde(rename = "maxNodes")]
    pub max_nodes: usize,
    #[serde(rename = "nodesBefore")]
    pub nodes_before: usize,
    #[serde(rename = "nodesAfter")]
    pub nodes_after: usize,
    #[serde(rename = "edgesBefore")]
    pub edges_before: usize,
    #[serde(rename = "edgesAfter")]
    pub edges_after: usize,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

impl PruneReport {
    pub fn nodes_removed(&self) -> usize {
        self.nodes_before - self.nodes_after
    }

    pub fn pruned(&self) -> bool {
        self.nodes_after < self.nodes_before
    }
}
