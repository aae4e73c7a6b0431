//! Entity identity, creation and merge-on-repeat aggregation.

use kgraph_core::{Error, Result};
use tracing::debug;

use crate::graph::KnowledgeGraph;
use crate::types::{normalize_text, EntityMention, EntityNode, NodeKey};

/// What `add_entity` did with an accepted mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Merged,
}

impl EntityMention {
    /// Identity key of a well-formed mention.
    ///
    /// Missing text or label and confidences outside [0, 1] (NaN included)
    /// are validation errors.
    pub fn validate(&self) -> Result<NodeKey> {
        let text = self
            .text
            .as_deref()
            .map(normalize_text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Validation("entity text is missing".into()))?;
        let label = self
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::Validation(format!("entity '{}' has no label", text)))?;
        let confidence = self.confidence_or_default();
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::Validation(format!(
                "entity '{}' confidence {} outside [0, 1]",
                text, confidence
            )));
        }
        Ok(NodeKey::new(&text, label))
    }
}

impl KnowledgeGraph {
    /// Add an entity mention observed in `source_id`.
    ///
    /// Rejects mentions without text or label and confidences outside [0, 1].
    /// A repeated key increments the count, folds the confidence into the
    /// running mean and records the source once.
    pub fn add_entity(&mut self, entity: &EntityMention, source_id: &str) -> Result<Upsert> {
        let key = entity.validate()?;
        let confidence = entity.confidence_or_default();

        if let Some(&idx) = self.node_index.get(&key) {
            let node = &mut self.graph[idx];
            node.count += 1;
            let n = node.count as f64;
            node.confidence = (node.confidence * (n - 1.0) + confidence) / n;
            if !node.sources.iter().any(|s| s == source_id) {
                node.sources.push(source_id.to_string());
            }
            return Ok(Upsert::Merged);
        }

        debug!("New entity {}", key);
        let seq = self.next_seq;
        self.insert_node(EntityNode {
            text: key.text,
            label: key.label,
            confidence,
            count: 1,
            sources: vec![source_id.to_string()],
            seq,
        });
        Ok(Upsert::Created)
    }

    /// Node snapshot for a key.
    pub fn lookup_by_key(&self, key: &NodeKey) -> Option<&EntityNode> {
        self.node_index.get(key).map(|&idx| &self.graph[idx])
    }

    /// Keys whose display text equals `text`, first-created first.
    pub fn lookup_by_text(&self, text: &str) -> &[NodeKey] {
        self.text_index
            .get(&normalize_text(text))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_create_then_merge() {
        let mut g = KnowledgeGraph::new();
        let e = EntityMention::new("Ada Lovelace", "PERSON", 0.8);
        assert_eq!(g.add_entity(&e, "doc1").unwrap(), Upsert::Created);
        assert_eq!(g.add_entity(&e, "doc2").unwrap(), Upsert::Merged);
        assert_eq!(g.node_count(), 1);

        let node = g.lookup_by_key(&NodeKey::new("Ada Lovelace", "PERSON")).unwrap();
        assert_eq!(node.count, 2);
        assert_eq!(node.sources, vec!["doc1", "doc2"]);
    }

    #[test]
    fn test_confidence_merge_is_commutative() {
        let key = NodeKey::new("Ada", "PERSON");
        for order in [[0.8, 0.6], [0.6, 0.8]] {
            let mut g = KnowledgeGraph::new();
            for c in order {
                g.add_entity(&EntityMention::new("Ada", "PERSON", c), "doc").unwrap();
            }
            let node = g.lookup_by_key(&key).unwrap();
            assert!(approx(node.confidence, 0.7), "got {}", node.confidence);
            assert_eq!(node.count, 2);
        }
    }

    #[test]
    fn test_running_mean_over_many() {
        let mut g = KnowledgeGraph::new();
        for c in [1.0, 0.5, 0.0, 0.5] {
            g.add_entity(&EntityMention::new("Ada", "PERSON", c), "doc").unwrap();
        }
        let node = g.lookup_by_key(&NodeKey::new("Ada", "PERSON")).unwrap();
        assert!(approx(node.confidence, 0.5));
        assert_eq!(node.count, 4);
    }

    #[test]
    fn test_sources_deduplicated_in_order() {
        let mut g = KnowledgeGraph::new();
        let e = EntityMention::new("Ada", "PERSON", 0.9);
        for doc in ["b", "a", "b", "c", "a"] {
            g.add_entity(&e, doc).unwrap();
        }
        let node = g.lookup_by_key(&NodeKey::new("Ada", "PERSON")).unwrap();
        assert_eq!(node.sources, vec!["b", "a", "c"]);
        assert_eq!(node.count, 5);
    }

    #[test]
    fn test_same_text_different_label_are_distinct() {
        let mut g = KnowledgeGraph::new();
        g.add_entity(&EntityMention::new("Java", "LANGUAGE", 0.9), "d").unwrap();
        g.add_entity(&EntityMention::new("Java", "LOCATION", 0.9), "d").unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(
            g.lookup_by_text("Java"),
            &[NodeKey::new("Java", "LANGUAGE"), NodeKey::new("Java", "LOCATION")]
        );
    }

    #[test]
    fn test_text_is_trimmed_for_identity() {
        let mut g = KnowledgeGraph::new();
        g.add_entity(&EntityMention::new(" Ada ", "PERSON", 0.9), "d").unwrap();
        g.add_entity(&EntityMention::new("Ada", "PERSON", 0.9), "d").unwrap();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.lookup_by_text("Ada ").len(), 1);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let mut g = KnowledgeGraph::new();
        let no_text = EntityMention {
            text: None,
            label: Some("PERSON".into()),
            confidence: Some(0.9),
        };
        let blank_label = EntityMention::new("Ada", "  ", 0.9);
        assert!(matches!(g.add_entity(&no_text, "d"), Err(Error::Validation(_))));
        assert!(matches!(g.add_entity(&blank_label, "d"), Err(Error::Validation(_))));
        assert!(g.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let mut g = KnowledgeGraph::new();
        for c in [-0.1, 1.01, f64::NAN] {
            let e = EntityMention::new("Ada", "PERSON", c);
            assert!(matches!(g.add_entity(&e, "d"), Err(Error::Validation(_))));
        }
        assert!(g.is_empty());
    }

    #[test]
    fn test_validate_returns_normalized_key() {
        let e = EntityMention::new("  Ada ", " PERSON", 0.5);
        assert_eq!(e.validate().unwrap(), NodeKey::new("Ada", "PERSON"));

        let no_label = EntityMention {
            text: Some("Ada".into()),
            label: None,
            confidence: Some(0.5),
        };
        assert!(no_label.validate().is_err());
        assert!(EntityMention::new("Ada", "PERSON", 1.7).validate().is_err());
    }

    #[test]
    fn test_missing_confidence_counts_as_full() {
        let mut g = KnowledgeGraph::new();
        let e = EntityMention {
            text: Some("Ada".into()),
            label: Some("PERSON".into()),
            confidence: None,
        };
        g.add_entity(&e, "d").unwrap();
        assert_eq!(g.lookup_by_key(&NodeKey::new("Ada", "PERSON")).unwrap().confidence, 1.0);
    }

    #[test]
    fn test_lookup_missing() {
        let g = KnowledgeGraph::new();
        assert!(g.lookup_by_key(&NodeKey::new("nobody", "PERSON")).is_none());
        assert!(g.lookup_by_text("nobody").is_empty());
    }
}
