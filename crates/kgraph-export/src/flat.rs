//! Flat interchange format: node-link JSON with scalar-only attributes.
//!
//! The transform is one-directional. List attributes become their JSON array
//! text, and reading the file back yields that text, never a list.

use std::collections::BTreeMap;

use kgraph_store::{AttrValue, KnowledgeGraph};
use serde::{Deserialize, Serialize};

/// Scalar attribute value. Deserialization can only ever produce scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<AttrValue> for FlatValue {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Int(i) => FlatValue::Int(i),
            AttrValue::Float(f) if f.is_finite() => FlatValue::Float(f),
            AttrValue::Float(f) => FlatValue::Text(f.to_string()),
            AttrValue::Text(s) => FlatValue::Text(s),
            AttrValue::Bool(b) => FlatValue::Bool(b),
            AttrValue::List(items) => FlatValue::Text(flatten_list(&items)),
        }
    }
}

/// Deterministic text form of a list attribute: its JSON array.
pub fn flatten_list(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    pub id: String,
    pub attributes: BTreeMap<String, FlatValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatEdge {
    pub source: String,
    pub target: String,
    pub attributes: BTreeMap<String, FlatValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatGraph {
    pub directed: bool,
    pub nodes: Vec<FlatNode>,
    pub edges: Vec<FlatEdge>,
}

/// Stable node id for interchange files, derived from the creation sequence.
pub fn node_id(seq: u64) -> String {
    format!("n{}", seq)
}

impl FlatGraph {
    pub fn from_graph(graph: &KnowledgeGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| FlatNode {
                id: node_id(n.seq),
                attributes: flatten_attrs(n.attributes()),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(s, t, e)| FlatEdge {
                source: node_id(s.seq),
                target: node_id(t.seq),
                attributes: flatten_attrs(e.attributes()),
            })
            .collect();
        Self {
            directed: true,
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: &str) -> Option<&FlatNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn flatten_attrs(attrs: Vec<(&'static str, AttrValue)>) -> BTreeMap<String, FlatValue> {
    attrs
        .into_iter()
        .map(|(k, v)| (k.to_string(), FlatValue::from(v)))
        .collect()
}
