//! Co-occurrence linking: edges from positional proximity within a document.

use kgraph_store::{EntityMention, KnowledgeGraph, RelationOutcome, CO_OCCURS};
use serde::Serialize;
use tracing::warn;

/// Number of following entities each entity links to.
pub const DEFAULT_WINDOW: usize = 4;
/// Weight contributed by one co-occurrence observation.
pub const CO_OCCURRENCE_WEIGHT: f64 = 0.5;

/// Counts from linking one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub created: usize,
    pub accumulated: usize,
    pub unresolved: usize,
}

impl LinkSummary {
    pub fn recorded(&self) -> usize {
        self.created + self.accumulated
    }
}

/// Links each entity to the next `window` entities of the filtered sequence.
#[derive(Debug, Clone)]
pub struct CooccurrenceLinker {
    window: usize,
    weight: f64,
}

impl Default for CooccurrenceLinker {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            weight: CO_OCCURRENCE_WEIGHT,
        }
    }
}

impl CooccurrenceLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts of well-formed mentions at or above `min_confidence`, in
    /// extraction order. Mentions that fail entity validation never link.
    pub fn filter(entities: &[EntityMention], min_confidence: f64) -> Vec<String> {
        entities
            .iter()
            .filter(|e| e.confidence_or_default() >= min_confidence)
            .filter_map(|e| e.validate().ok())
            .map(|key| key.text)
            .collect()
    }

    /// Ordered (source, target) pairs within the forward window, equal texts skipped.
    pub fn candidate_pairs<'a>(&self, texts: &'a [String]) -> Vec<(&'a str, &'a str)> {
        let mut pairs = Vec::new();
        for (i, source) in texts.iter().enumerate() {
            let end = (i + 1 + self.window).min(texts.len());
            for target in &texts[i + 1..end] {
                if source != target {
                    pairs.push((source.as_str(), target.as_str()));
                }
            }
        }
        pairs
    }

    /// Add co-occurrence edges for one document's mentions.
    pub fn link(
        &self,
        graph: &mut KnowledgeGraph,
        entities: &[EntityMention],
        min_confidence: f64,
    ) -> LinkSummary {
        let texts = Self::filter(entities, min_confidence);
        let mut summary = LinkSummary::default();

        for (source, target) in self.candidate_pairs(&texts) {
            match graph.add_relationship(source, target, CO_OCCURS, self.weight) {
                Ok(RelationOutcome::Created) => summary.created += 1,
                Ok(RelationOutcome::Accumulated) => summary.accumulated += 1,
                Ok(RelationOutcome::Unresolved) | Ok(RelationOutcome::SelfLoop) => {
                    summary.unresolved += 1
                }
                Err(e) => warn!("Dropped co-occurrence {} -> {}: {}", source, target, e),
            }
        }
        summary
    }
}
