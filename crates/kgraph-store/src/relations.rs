//! Edge identity and weight/count aggregation.

use kgraph_core::{Error, Result};

use crate::graph::KnowledgeGraph;
use crate::types::{NodeKey, RelationEdge};

/// Relation type of edges inferred from positional proximity.
pub const CO_OCCURS: &str = "CO_OCCURS";

/// Result of recording one relationship observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOutcome {
    Created,
    Accumulated,
    /// One side resolved to no node; the observation is dropped.
    Unresolved,
    /// Both sides resolved to the same node.
    SelfLoop,
}

impl KnowledgeGraph {
    /// Record a relationship between two entity texts.
    ///
    /// Each side resolves through the text index; when several labels share
    /// the text, the first-created node wins.
    pub fn add_relationship(
        &mut self,
        source_text: &str,
        target_text: &str,
        relation: &str,
        weight: f64,
    ) -> Result<RelationOutcome> {
        let source = self.lookup_by_text(source_text).first().cloned();
        let target = self.lookup_by_text(target_text).first().cloned();
        match (source, target) {
            (Some(s), Some(t)) => self.add_relation_between(&s, &t, relation, weight),
            _ => Ok(RelationOutcome::Unresolved),
        }
    }

    /// Record a relationship between two node keys.
    ///
    /// An existing edge keeps its original relation type and accumulates
    /// weight and count.
    pub fn add_relation_between(
        &mut self,
        source: &NodeKey,
        target: &NodeKey,
        relation: &str,
        weight: f64,
    ) -> Result<RelationOutcome> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::Validation(format!(
                "relation weight {} must be a finite non-negative number",
                weight
            )));
        }
        if source == target {
            return Ok(RelationOutcome::SelfLoop);
        }
        let (Some(&s), Some(&t)) = (self.node_index.get(source), self.node_index.get(target))
        else {
            return Ok(RelationOutcome::Unresolved);
        };

        if let Some(edge_idx) = self.graph.find_edge(s, t) {
            let edge = &mut self.graph[edge_idx];
            edge.weight += weight;
            edge.count += 1;
            return Ok(RelationOutcome::Accumulated);
        }

        self.graph.add_edge(
            s,
            t,
            RelationEdge {
                relation: relation.to_string(),
                weight,
                count: 1,
            },
        );
        Ok(RelationOutcome::Created)
    }

    /// Edge between two keys, if any.
    pub fn relation(&self, source: &NodeKey, target: &NodeKey) -> Option<&RelationEdge> {
        let s = *self.node_index.get(source)?;
        let t = *self.node_index.get(target)?;
        self.graph.find_edge(s, t).map(|e| &self.graph[e])
    }
}
