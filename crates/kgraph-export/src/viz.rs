//! Visualization hand-off: node/edge lists a network renderer consumes directly.

use kgraph_store::KnowledgeGraph;
use serde::{Deserialize, Serialize};

use crate::flat::node_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    /// Entity type; renderers color by group.
    pub group: String,
    /// Hover text.
    pub title: String,
    /// Size hint: occurrence count.
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    pub value: f64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisGraph {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

impl VisGraph {
    /// Render-ready lists for an already sampled graph.
    pub fn from_graph(graph: &KnowledgeGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| VisNode {
                id: node_id(n.seq),
                label: n.text.clone(),
                group: n.label.clone(),
                title: format!(
                    "{} ({})\nconfidence: {:.2}\nmentions: {}\nsources: {}",
                    n.text,
                    n.label,
                    n.confidence,
                    n.count,
                    n.sources.len()
                ),
                value: n.count,
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(s, t, e)| VisEdge {
                from: node_id(s.seq),
                to: node_id(t.seq),
                value: e.weight,
                title: format!("{} (x{})", e.relation, e.count),
            })
            .collect();
        Self { nodes, edges }
    }
}
