//! Prune execution.

use kgraph_store::KnowledgeGraph;
use tracing::{debug, info};

use crate::types::PruneReport;

/// Reduces a graph to at most `max_nodes` nodes.
pub struct Pruner;

impl Pruner {
    /// Prune `graph` in place. A graph already within budget is left untouched.
    pub fn prune(graph: &mut KnowledgeGraph, max_nodes: usize) -> PruneReport {
        let start = std::time::Instant::now();
        let mut report = PruneReport {
            max_nodes,
            nodes_before: graph.node_count(),
            edges_before: graph.edge_count(),
            ..Default::default()
        };

        if graph.node_count() <= max_nodes {
            debug!(
                "Graph within budget ({} <= {}), nothing to prune",
                graph.node_count(),
                max_nodes
            );
        } else {
            *graph = graph.sample(max_nodes);
            info!(
                "Pruned graph to {} nodes ({} removed)",
                graph.node_count(),
                report.nodes_before - graph.node_count()
            );
        }

        report.nodes_after = graph.node_count();
        report.edges_after = graph.edge_count();
        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}
