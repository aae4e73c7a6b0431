//! Degree-centrality ranking and centrality-sampled subgraphs.
//!
//! Ranking order is centrality descending, then creation sequence ascending.
//! The pruner, the statistics top list and the visualization sample all use
//! this one order.

use serde::Serialize;

use crate::graph::KnowledgeGraph;
use crate::types::NodeKey;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub key: NodeKey,
    pub degree: usize,
    pub centrality: f64,
    pub seq: u64,
}

impl KnowledgeGraph {
    /// `(in + out) / (N - 1)` per node in creation order; 0 when `N <= 1`.
    pub fn degree_centrality(&self) -> Vec<(NodeKey, f64)> {
        let scale = self.centrality_scale();
        let degrees = self.degrees();
        self.graph
            .node_indices()
            .map(|idx| (self.graph[idx].key(), degrees[idx.index()] as f64 * scale))
            .collect()
    }

    /// All nodes in ranking order.
    pub fn ranked_nodes(&self) -> Vec<RankedNode> {
        let scale = self.centrality_scale();
        let degrees = self.degrees();
        let mut ranked: Vec<RankedNode> = self
            .graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                let degree = degrees[idx.index()];
                RankedNode {
                    key: node.key(),
                    degree,
                    centrality: degree as f64 * scale,
                    seq: node.seq,
                }
            })
            .collect();

        // Centrality is degree times a per-graph constant, so comparing the
        // integer degree gives the same order without float ties.
        ranked.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.seq.cmp(&b.seq)));
        ranked
    }

    /// Induced subgraph over the top `n` ranked nodes.
    pub fn sample(&self, n: usize) -> KnowledgeGraph {
        if n >= self.node_count() {
            return self.clone();
        }
        let top: Vec<NodeKey> = self
            .ranked_nodes()
            .into_iter()
            .take(n)
            .map(|r| r.key)
            .collect();
        self.induced_subgraph(top.iter())
    }

    /// Top `k` entities as (display text, centrality).
    pub fn top_entities(&self, k: usize) -> Vec<(String, f64)> {
        self.ranked_nodes()
            .into_iter()
            .take(k)
            .map(|r| (r.key.text, r.centrality))
            .collect()
    }

    fn centrality_scale(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            0.0
        } else {
            1.0 / (n - 1) as f64
        }
    }
}
