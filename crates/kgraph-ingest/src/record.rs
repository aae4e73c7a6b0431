//! Extraction record produced per document by the upstream NLP stage.

use kgraph_store::EntityMention;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(alias = "document_id")]
    pub doc_id: String,
    /// Mentions in extraction order; order drives co-occurrence windows.
    pub entities: Vec<EntityMention>,
    /// Explicit relation tuples. Carried through but not linked.
    #[serde(default)]
    pub relationships: Vec<serde_json::Value>,
}

impl ExtractionRecord {
    pub fn new(doc_id: &str, entities: Vec<EntityMention>) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            entities,
            relationships: Vec::new(),
        }
    }
}
