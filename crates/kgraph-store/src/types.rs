//! Data types for entities, relations and exported attribute values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize raw entity text for identity: trimmed, case preserved.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_string()
}

/// Composite identity of an entity node.
///
/// Kept as a pair so that text containing any separator character can never
/// collide with a different (text, label) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub text: String,
    pub label: String,
}

impl NodeKey {
    pub fn new(text: &str, label: &str) -> Self {
        Self {
            text: normalize_text(text),
            label: label.trim().to_string(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.text, self.label)
    }
}

/// One entity occurrence as produced by the upstream extractor.
///
/// Fields are optional so that malformed mentions survive deserialization
/// and are rejected individually by [`crate::KnowledgeGraph::add_entity`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Absent confidence counts as full confidence.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl EntityMention {
    pub fn new(text: &str, label: &str, confidence: f64) -> Self {
        Self {
            text: Some(text.to_string()),
            label: Some(label.to_string()),
            confidence: Some(confidence),
        }
    }

    pub fn confidence_or_default(&self) -> f64 {
        self.confidence.unwrap_or(1.0)
    }
}

/// A deduplicated entity node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    pub text: String,
    pub label: String,
    /// Running mean of every confidence observed for this key.
    pub confidence: f64,
    pub count: u64,
    /// Distinct source document ids in first-seen order.
    pub sources: Vec<String>,
    /// Creation order within the build job; ranking tie-break.
    pub seq: u64,
}

impl EntityNode {
    pub fn key(&self) -> NodeKey {
        NodeKey {
            text: self.text.clone(),
            label: self.label.clone(),
        }
    }

    /// Attribute view used by the interchange exporters.
    pub fn attributes(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            ("text", AttrValue::Text(self.text.clone())),
            ("label", AttrValue::Text(self.label.clone())),
            ("confidence", AttrValue::Float(self.confidence)),
            ("count", AttrValue::Int(self.count as i64)),
            ("sources", AttrValue::List(self.sources.clone())),
        ]
    }
}

/// Aggregated relation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEdge {
    #[serde(rename = "type")]
    pub relation: String,
    pub weight: f64,
    pub count: u64,
}

impl RelationEdge {
    pub fn attributes(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            ("type", AttrValue::Text(self.relation.clone())),
            ("weight", AttrValue::Float(self.weight)),
            ("count", AttrValue::Int(self.count as i64)),
        ]
    }
}

/// Attribute value as seen by exporters: scalar or ordered list of strings.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl AttrValue {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, AttrValue::List(_))
    }
}
