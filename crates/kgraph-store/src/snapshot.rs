//! Full-fidelity snapshot model and reload with invariant checks.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use kgraph_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::KnowledgeGraph;
use crate::types::{EntityNode, NodeKey, RelationEdge};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Every node and edge with native-typed attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub format_version: u32,
    pub created_at: DateTime<Utc>,
    pub nodes: Vec<EntityNode>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(rename = "type")]
    pub relation: String,
    pub weight: f64,
    pub count: u64,
}

impl KnowledgeGraph {
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            created_at: Utc::now(),
            nodes: self.nodes().cloned().collect(),
            edges: self
                .edges()
                .map(|(s, t, e)| SnapshotEdge {
                    source: s.key(),
                    target: t.key(),
                    relation: e.relation.clone(),
                    weight: e.weight,
                    count: e.count,
                })
                .collect(),
        }
    }

    /// Rebuild a graph from a snapshot, rejecting any that break graph invariants.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::Snapshot(format!(
                "unsupported format version {}",
                snapshot.format_version
            )));
        }

        let mut nodes = snapshot.nodes;
        nodes.sort_by_key(|n| n.seq);

        let mut graph = KnowledgeGraph::new();
        let mut seqs = HashSet::new();
        for node in nodes {
            check_node(&node)?;
            if !seqs.insert(node.seq) {
                return Err(Error::Snapshot(format!("duplicate sequence {}", node.seq)));
            }
            let key = node.key();
            if graph.contains(&key) {
                return Err(Error::Snapshot(format!("duplicate node {}", key)));
            }
            graph.insert_node(node);
        }

        for edge in snapshot.edges {
            if edge.source == edge.target {
                return Err(Error::Snapshot(format!("self loop on {}", edge.source)));
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 || edge.count == 0 {
                return Err(Error::Snapshot(format!(
                    "edge {} -> {} has invalid weight/count",
                    edge.source, edge.target
                )));
            }
            let (Some(&s), Some(&t)) = (
                graph.node_index.get(&edge.source),
                graph.node_index.get(&edge.target),
            ) else {
                return Err(Error::Snapshot(format!(
                    "edge {} -> {} has a missing endpoint",
                    edge.source, edge.target
                )));
            };
            if graph.graph.find_edge(s, t).is_some() {
                return Err(Error::Snapshot(format!(
                    "duplicate edge {} -> {}",
                    edge.source, edge.target
                )));
            }
            graph.graph.add_edge(
                s,
                t,
                RelationEdge {
                    relation: edge.relation,
                    weight: edge.weight,
                    count: edge.count,
                },
            );
        }

        debug!(
            "Reloaded snapshot: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

fn check_node(node: &EntityNode) -> Result<()> {
    let key = node.key();
    if key != NodeKey::new(&node.text, &node.label) || key.text.is_empty() || key.label.is_empty()
    {
        return Err(Error::Snapshot(format!("node {} is not normalized", key)));
    }
    if !(0.0..=1.0).contains(&node.confidence) {
        return Err(Error::Snapshot(format!(
            "node {} confidence {} outside [0, 1]",
            key, node.confidence
        )));
    }
    if node.count == 0 {
        return Err(Error::Snapshot(format!("node {} has zero count", key)));
    }
    let distinct: HashSet<&String> = node.sources.iter().collect();
    if distinct.len() != node.sources.len() {
        return Err(Error::Snapshot(format!("node {} repeats a source", key)));
    }
    Ok(())
}
