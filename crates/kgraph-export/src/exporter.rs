//! Export orchestration and reload of saved graphs.

use std::path::{Path, PathBuf};

use kgraph_core::{Error, GraphConfig, Result};
use kgraph_store::{GraphSnapshot, GraphStats, KnowledgeGraph};
use serde::Serialize;
use tracing::info;

use crate::atomic::write_atomic;
use crate::flat::FlatGraph;
use crate::graphml::write_graphml;
use crate::viz::VisGraph;

/// Files published by [`Exporter::save_graph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPaths {
    pub snapshot: PathBuf,
    pub flat: PathBuf,
    pub graphml: PathBuf,
    pub stats: PathBuf,
}

/// Writes a finished graph into one output directory.
pub struct Exporter {
    output_dir: PathBuf,
    top_k: usize,
    sample_size: usize,
}

impl Exporter {
    pub fn new(output_dir: &Path, config: &GraphConfig) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            top_k: config.top_k,
            sample_size: config.visualization_sample_size,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Centrality-sampled subgraph for visualization.
    pub fn sample(&self, graph: &KnowledgeGraph) -> KnowledgeGraph {
        graph.sample(self.sample_size)
    }

    /// Full snapshot, flat interchange, GraphML and the companion statistics.
    pub fn save_graph(&self, graph: &KnowledgeGraph, name: &str) -> Result<ExportPaths> {
        let paths = ExportPaths {
            snapshot: self.save_snapshot(graph, name)?,
            flat: self.save_flat(graph, name)?,
            graphml: self.save_graphml(graph, name)?,
            stats: self.save_stats(graph, name)?,
        };
        Ok(paths)
    }

    pub fn save_snapshot(&self, graph: &KnowledgeGraph, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.snapshot.json", name));
        write_json(&path, &graph.snapshot())?;
        info!("Saved graph snapshot to {}", path.display());
        Ok(path)
    }

    pub fn save_flat(&self, graph: &KnowledgeGraph, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.flat.json", name));
        write_json(&path, &FlatGraph::from_graph(graph))?;
        info!("Saved flat graph to {}", path.display());
        Ok(path)
    }

    pub fn save_graphml(&self, graph: &KnowledgeGraph, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.graphml", name));
        let mut buf = Vec::new();
        write_graphml(&FlatGraph::from_graph(graph), &mut buf)?;
        write_atomic(&path, &buf)?;
        info!("Saved GraphML to {}", path.display());
        Ok(path)
    }

    pub fn save_stats(&self, graph: &KnowledgeGraph, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}_stats.json", name));
        let stats: GraphStats = graph.stats(self.top_k);
        write_json(&path, &stats)?;
        info!("Saved statistics to {}", path.display());
        Ok(path)
    }

    /// Sample the graph and write the renderer hand-off document.
    pub fn save_visualization(&self, graph: &KnowledgeGraph, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}_viz.json", name));
        let sampled = self.sample(graph);
        write_json(&path, &VisGraph::from_graph(&sampled))?;
        info!(
            "Saved visualization data ({} nodes) to {}",
            sampled.node_count(),
            path.display()
        );
        Ok(path)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &json)
}

fn read_export(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::NotFound(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Reload a full snapshot, checking graph invariants.
pub fn load_snapshot(path: &Path) -> Result<KnowledgeGraph> {
    let text = read_export(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&text)?;
    KnowledgeGraph::from_snapshot(snapshot)
}

/// Read a flat interchange file. List attributes come back as their text form.
pub fn load_flat(path: &Path) -> Result<FlatGraph> {
    let text = read_export(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_store::EntityMention;

    fn test_graph() -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new();
        for (text, label) in [("Ada", "PERSON"), ("Engine", "THING"), ("London", "GPE")] {
            g.add_entity(&EntityMention::new(text, label, 0.85), "doc1").unwrap();
        }
        g.add_entity(&EntityMention::new("Ada", "PERSON", 0.65), "doc2").unwrap();
        g.add_relationship("Ada", "Engine", "CO_OCCURS", 0.5).unwrap();
        g.add_relationship("Ada", "London", "CO_OCCURS", 0.5).unwrap();
        g
    }

    #[test]
    fn test_save_graph_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), &GraphConfig::default());
        let paths = exporter.save_graph(&test_graph(), "knowledge_graph").unwrap();

        for p in [&paths.snapshot, &paths.flat, &paths.graphml, &paths.stats] {
            assert!(p.is_file(), "{} missing", p.display());
        }
        assert!(paths.stats.ends_with("knowledge_graph_stats.json"));
    }

    #[test]
    fn test_snapshot_reload_preserves_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), &GraphConfig::default());
        let g = test_graph();
        let path = exporter.save_snapshot(&g, "kg").unwrap();

        let reloaded = load_snapshot(&path).unwrap();
        let before: Vec<_> = g.nodes().cloned().collect();
        let after: Vec<_> = reloaded.nodes().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(reloaded.edge_count(), 2);
    }

    #[test]
    fn test_visualization_uses_sample_size() {
        let dir = tempfile::tempdir().unwrap();
        let config = GraphConfig {
            visualization_sample_size: 1,
            ..Default::default()
        };
        let exporter = Exporter::new(dir.path(), &config);
        let path = exporter.save_visualization(&test_graph(), "kg").unwrap();

        let vis: VisGraph = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(vis.nodes.len(), 1);
        assert_eq!(vis.nodes[0].label, "Ada");
        assert!(vis.edges.is_empty());
    }

    #[test]
    fn test_missing_export_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.snapshot.json");
        assert!(matches!(load_snapshot(&missing), Err(Error::NotFound(_))));
        assert!(matches!(load_flat(&missing), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_export_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("graphs");
        std::fs::write(&blocker, "not a directory").unwrap();
        let exporter = Exporter::new(&blocker, &GraphConfig::default());
        assert!(exporter.save_graph(&test_graph(), "kg").is_err());
    }
}
