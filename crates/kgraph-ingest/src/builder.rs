//! Graph build job: records → entities → co-occurrence edges → prune.

use std::path::{Path, PathBuf};

use kgraph_consolidate::{PruneReport, Pruner};
use kgraph_core::{GraphConfig, Result};
use kgraph_store::{KnowledgeGraph, Upsert};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::file;
use crate::linker::CooccurrenceLinker;
use crate::record::ExtractionRecord;

/// A document that was not ingested, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub source: String,
    pub reason: String,
}

/// Per-run ingestion counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    #[serde(rename = "documentsProcessed")]
    pub documents_processed: usize,
    #[serde(rename = "documentsSkipped")]
    pub documents_skipped: usize,
    #[serde(rename = "entitiesCreated")]
    pub entities_created: usize,
    #[serde(rename = "entitiesMerged")]
    pub entities_merged: usize,
    #[serde(rename = "entitiesBelowThreshold")]
    pub entities_below_threshold: usize,
    #[serde(rename = "entitiesRejected")]
    pub entities_rejected: usize,
    #[serde(rename = "cooccurrencesRecorded")]
    pub cooccurrences_recorded: usize,
    pub skipped: Vec<SkippedDocument>,
}

/// Everything a finished build job hands back.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: KnowledgeGraph,
    pub ingest: IngestReport,
    pub prune: PruneReport,
}

/// Owns the graph for exactly one construction job.
pub struct GraphBuilder {
    config: GraphConfig,
    graph: KnowledgeGraph,
    linker: CooccurrenceLinker,
    report: IngestReport,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            graph: KnowledgeGraph::new(),
            linker: CooccurrenceLinker::new(),
            report: IngestReport::default(),
        }
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Add one document's entities, then its co-occurrence edges.
    ///
    /// Malformed mentions are rejected before the confidence threshold
    /// applies, and take no part in linking.
    pub fn ingest_record(&mut self, record: &ExtractionRecord) {
        let min_confidence = self.config.min_confidence;

        for entity in &record.entities {
            if let Err(e) = entity.validate() {
                debug!("Skipping entity in {}: {}", record.doc_id, e);
                self.report.entities_rejected += 1;
                continue;
            }
            if entity.confidence_or_default() < min_confidence {
                self.report.entities_below_threshold += 1;
                continue;
            }
            match self.graph.add_entity(entity, &record.doc_id) {
                Ok(Upsert::Created) => self.report.entities_created += 1,
                Ok(Upsert::Merged) => self.report.entities_merged += 1,
                Err(e) => {
                    debug!("Skipping entity in {}: {}", record.doc_id, e);
                    self.report.entities_rejected += 1;
                }
            }
        }

        let links = self.linker.link(&mut self.graph, &record.entities, min_confidence);
        self.report.cooccurrences_recorded += links.recorded();
        self.report.documents_processed += 1;
    }

    /// Load and ingest one record file. A file that cannot be read or parsed
    /// is counted as skipped and its error returned; the graph is unchanged.
    pub fn ingest_file(&mut self, path: &Path) -> Result<()> {
        match file::load_record(path) {
            Ok(record) => {
                self.ingest_record(&record);
                Ok(())
            }
            Err(e) => {
                warn!("Skipping document {}: {}", path.display(), e);
                self.report.documents_skipped += 1;
                self.report.skipped.push(SkippedDocument {
                    source: path.display().to_string(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Ingest files in the given order, then finish the job.
    pub fn build_from_files(mut self, paths: &[PathBuf]) -> BuildOutcome {
        info!("Building graph from {} extraction records", paths.len());
        for path in paths {
            // Failures are already counted in the report
            let _ = self.ingest_file(path);
        }
        self.finish()
    }

    /// Enforce the node budget and return the graph with its reports.
    pub fn finish(mut self) -> BuildOutcome {
        let prune = Pruner::prune(&mut self.graph, self.config.max_nodes);
        info!(
            "Graph built with {} nodes and {} edges ({} documents, {} skipped)",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.report.documents_processed,
            self.report.documents_skipped
        );
        BuildOutcome {
            graph: self.graph,
            ingest: self.report,
            prune,
        }
    }
}
