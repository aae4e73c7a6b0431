//! Knowledge graph backend using petgraph.
//!
//! One `KnowledgeGraph` is owned by one build job. Node identity is the
//! composite [`NodeKey`]; a text index maps display text to the keys sharing
//! it in creation order so relation endpoints resolve deterministically.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::types::{EntityNode, NodeKey, RelationEdge};

/// In-memory directed entity graph.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    pub(crate) graph: DiGraph<EntityNode, RelationEdge>,
    pub(crate) node_index: HashMap<NodeKey, NodeIndex>,
    pub(crate) text_index: HashMap<String, Vec<NodeKey>>,
    pub(crate) next_seq: u64,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &EntityNode> {
        self.graph.node_indices().map(move |i| &self.graph[i])
    }

    /// Edges as (source node, target node, relation).
    pub fn edges(&self) -> impl Iterator<Item = (&EntityNode, &EntityNode, &RelationEdge)> {
        self.graph
            .edge_references()
            .map(move |e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.node_index.contains_key(key)
    }

    /// Register a fully formed node. The caller guarantees the key is new.
    pub(crate) fn insert_node(&mut self, node: EntityNode) -> NodeIndex {
        let key = node.key();
        self.next_seq = self.next_seq.max(node.seq + 1);
        let idx = self.graph.add_node(node);
        self.text_index
            .entry(key.text.clone())
            .or_default()
            .push(key.clone());
        self.node_index.insert(key, idx);
        idx
    }

    /// Induced subgraph over the given keys. Unknown keys are ignored;
    /// creation order and sequence numbers carry over.
    pub fn induced_subgraph<'a, I>(&self, keys: I) -> KnowledgeGraph
    where
        I: IntoIterator<Item = &'a NodeKey>,
    {
        let keep: HashSet<NodeIndex> = keys
            .into_iter()
            .filter_map(|k| self.node_index.get(k).copied())
            .collect();

        // filter_map keeps relative node order and drops edges with a removed endpoint
        let graph = self.graph.filter_map(
            |idx, node| keep.contains(&idx).then(|| node.clone()),
            |_, edge| Some(edge.clone()),
        );

        let mut sub = KnowledgeGraph {
            graph,
            node_index: HashMap::new(),
            text_index: HashMap::new(),
            next_seq: self.next_seq,
        };
        sub.rebuild_indexes();
        sub
    }

    fn rebuild_indexes(&mut self) {
        self.node_index.clear();
        self.text_index.clear();
        for idx in self.graph.node_indices() {
            let key = self.graph[idx].key();
            self.text_index
                .entry(key.text.clone())
                .or_default()
                .push(key.clone());
            self.node_index.insert(key, idx);
        }
    }

    /// Total degree (in + out) per node, indexed by `NodeIndex::index()`.
    pub(crate) fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0usize; self.graph.node_count()];
        for edge in self.graph.edge_references() {
            degrees[edge.source().index()] += 1;
            degrees[edge.target().index()] += 1;
        }
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityMention;

    fn path_graph() -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new();
        for text in ["X", "Y", "Z"] {
            g.add_entity(&EntityMention::new(text, "T", 0.9), "doc").unwrap();
        }
        g.add_relationship("X", "Y", "CO_OCCURS", 0.5).unwrap();
        g.add_relationship("Y", "Z", "CO_OCCURS", 0.5).unwrap();
        g
    }

    #[test]
    fn test_nodes_in_creation_order() {
        let g = path_graph();
        let texts: Vec<&str> = g.nodes().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["X", "Y", "Z"]);
        let seqs: Vec<u64> = g.nodes().map(|n| n.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn test_induced_subgraph_drops_dangling_edges() {
        let g = path_graph();
        let keep = [NodeKey::new("X", "T"), NodeKey::new("Z", "T")];
        let sub = g.induced_subgraph(keep.iter());
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 0);
        assert!(sub.contains(&NodeKey::new("Z", "T")));
        assert!(!sub.contains(&NodeKey::new("Y", "T")));
        assert_eq!(sub.lookup_by_text("Z"), &[NodeKey::new("Z", "T")]);
    }

    #[test]
    fn test_induced_subgraph_keeps_sequence() {
        let g = path_graph();
        let keep = [NodeKey::new("Z", "T"), NodeKey::new("Y", "T")];
        let sub = g.induced_subgraph(keep.iter());
        let seqs: Vec<u64> = sub.nodes().map(|n| n.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(sub.edge_count(), 1);
    }

    #[test]
    fn test_degrees() {
        let g = path_graph();
        assert_eq!(g.degrees(), vec![1, 2, 1]);
    }
}
