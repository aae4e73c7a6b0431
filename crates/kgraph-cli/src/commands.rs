//! Command implementations and their human-readable reports.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use kgraph_core::{DataPaths, GraphConfig};
use kgraph_export::{load_snapshot, ExportPaths, Exporter};
use kgraph_ingest::{discover_records, BuildOutcome, GraphBuilder};
use tracing::info;

/// Parsed `build` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildArgs {
    pub input_dir: Option<PathBuf>,
    pub output: String,
    pub visualize: bool,
}

impl BuildArgs {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = BuildArgs {
            input_dir: None,
            output: "knowledge_graph".to_string(),
            visualize: false,
        };
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--output" | "-o" => {
                    parsed.output = iter
                        .next()
                        .ok_or_else(|| format!("{} needs a value", arg))?
                        .clone();
                }
                "--visualize" | "-v" => parsed.visualize = true,
                flag if flag.starts_with('-') => return Err(format!("Unknown option: {}", flag)),
                dir if parsed.input_dir.is_none() => parsed.input_dir = Some(PathBuf::from(dir)),
                extra => return Err(format!("Unexpected argument: {}", extra)),
            }
        }
        Ok(parsed)
    }
}

/// Result of a `build` run.
#[derive(Debug)]
pub struct BuildSummary {
    pub outcome: BuildOutcome,
    pub exports: ExportPaths,
    pub visualization: Option<PathBuf>,
}

/// Ingest every record in the input directory, prune, and export.
pub fn build(
    paths: &DataPaths,
    config: &GraphConfig,
    args: &BuildArgs,
) -> anyhow::Result<BuildSummary> {
    let input_dir = args.input_dir.clone().unwrap_or_else(|| paths.entities.clone());
    let files = discover_records(&input_dir)
        .with_context(|| format!("Cannot list {}", input_dir.display()))?;
    if files.is_empty() {
        bail!("No extraction records found in {}", input_dir.display());
    }

    let outcome = GraphBuilder::new(config.clone()).build_from_files(&files);

    let exporter = Exporter::new(&paths.graphs, config);
    let exports = exporter
        .save_graph(&outcome.graph, &args.output)
        .context("Failed to export graph")?;
    let visualization = if args.visualize {
        Some(
            exporter
                .save_visualization(&outcome.graph, &args.output)
                .context("Failed to export visualization data")?,
        )
    } else {
        None
    };

    info!("Build '{}' complete", args.output);
    Ok(BuildSummary {
        outcome,
        exports,
        visualization,
    })
}

pub fn print_build_summary(summary: &BuildSummary) {
    let ingest = &summary.outcome.ingest;
    let prune = &summary.outcome.prune;
    let graph = &summary.outcome.graph;

    println!("=== Graph Build ===");
    println!("Documents processed: {}", ingest.documents_processed);
    println!("Documents skipped:   {}", ingest.documents_skipped);
    println!(
        "Entities: {} created, {} merged, {} below threshold, {} rejected",
        ingest.entities_created,
        ingest.entities_merged,
        ingest.entities_below_threshold,
        ingest.entities_rejected
    );
    println!("Co-occurrences recorded: {}", ingest.cooccurrences_recorded);
    if prune.pruned() {
        println!(
            "Pruned {} -> {} nodes (budget {})",
            prune.nodes_before, prune.nodes_after, prune.max_nodes
        );
    }
    println!("Graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());

    println!();
    println!("Outputs:");
    println!("  snapshot: {}", summary.exports.snapshot.display());
    println!("  flat:     {}", summary.exports.flat.display());
    println!("  graphml:  {}", summary.exports.graphml.display());
    println!("  stats:    {}", summary.exports.stats.display());
    if let Some(viz) = &summary.visualization {
        println!("  viz:      {}", viz.display());
    }

    if !ingest.skipped.is_empty() {
        println!();
        println!("Skipped documents:");
        for doc in &ingest.skipped {
            println!("  - {}: {}", doc.source, doc.reason);
        }
    }
}

/// Statistics JSON for a saved snapshot, with the configured `top_k`.
pub fn stats(snapshot: &Path, config: &GraphConfig) -> anyhow::Result<String> {
    let graph = load_snapshot(snapshot)
        .with_context(|| format!("Cannot load {}", snapshot.display()))?;
    Ok(serde_json::to_string_pretty(&graph.stats(config.top_k))?)
}

/// Outcome of validating a saved snapshot.
#[derive(Debug)]
pub struct ValidationReport {
    pub valid: bool,
    pub nodes: usize,
    pub edges: usize,
    pub errors: Vec<String>,
}

/// Reload a snapshot and check graph invariants.
pub fn validate(snapshot: &Path) -> ValidationReport {
    match load_snapshot(snapshot) {
        Ok(graph) => ValidationReport {
            valid: true,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            errors: Vec::new(),
        },
        Err(e) => ValidationReport {
            valid: false,
            nodes: 0,
            edges: 0,
            errors: vec![e.to_string()],
        },
    }
}

pub fn print_validation_report(report: &ValidationReport) {
    println!("=== Snapshot Validation ===");
    println!("Valid: {}", report.valid);
    if report.valid {
        println!("Nodes: {}", report.nodes);
        println!("Edges: {}", report.edges);
    }
    for e in &report.errors {
        println!("  ERROR: {}", e);
    }
}
