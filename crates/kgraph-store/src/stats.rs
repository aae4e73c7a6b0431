//! Descriptive statistics over the current graph.

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use serde::{Deserialize, Serialize};

use crate::graph::KnowledgeGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub avg_degree: f64,
    /// Weakly connected components: edges taken as undirected.
    pub connected_components: usize,
    pub entity_types: BTreeMap<String, usize>,
    pub top_entities: Vec<(String, f64)>,
}

impl KnowledgeGraph {
    /// Compute statistics, reporting the `top_k` most central entities.
    pub fn stats(&self, top_k: usize) -> GraphStats {
        let n = self.node_count();
        let e = self.edge_count();

        let density = if n > 1 {
            e as f64 / (n as f64 * (n - 1) as f64)
        } else {
            0.0
        };
        let avg_degree = if n > 0 {
            self.degrees().iter().sum::<usize>() as f64 / n as f64
        } else {
            0.0
        };

        let mut entity_types = BTreeMap::new();
        for node in self.nodes() {
            *entity_types.entry(node.label.clone()).or_insert(0) += 1;
        }

        GraphStats {
            nodes: n,
            edges: e,
            density,
            avg_degree,
            // For directed graphs petgraph counts weakly connected components
            connected_components: connected_components(&self.graph),
            entity_types,
            top_entities: self.top_entities(top_k),
        }
    }
}
