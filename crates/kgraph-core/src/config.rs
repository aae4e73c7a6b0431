//! Build configuration and data directory management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_MAX_NODES: usize = 1000;
pub const DEFAULT_VISUALIZATION_SAMPLE_SIZE: usize = 100;
pub const DEFAULT_MERGE_THRESHOLD: f64 = 0.85;
pub const DEFAULT_TOP_K: usize = 10;

/// Build configuration file name under the data root.
pub const CONFIG_FILE_NAME: &str = "kgraph.json";

/// Paths to all kgraph data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Extraction records produced upstream (`data/entities/`).
    pub entities: PathBuf,
    /// Graph exports (`data/graphs/`).
    pub graphs: PathBuf,
    /// Build configuration (`data/kgraph.json`).
    pub config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            entities: root.join("entities"),
            graphs: root.join("graphs"),
            config_file: root.join(CONFIG_FILE_NAME),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.entities)?;
        std::fs::create_dir_all(&self.graphs)?;
        Ok(())
    }
}

/// Options recognized by a graph construction job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Entities below this confidence are excluded from nodes and linking.
    pub min_confidence: f64,
    /// Node budget enforced by the pruner.
    pub max_nodes: usize,
    /// Number of nodes handed to the visualization renderer.
    pub visualization_sample_size: usize,
    /// Reserved for similarity-based duplicate merging. Not read by any merge logic.
    pub merge_threshold: f64,
    /// Number of top entities reported in statistics.
    pub top_k: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_nodes: DEFAULT_MAX_NODES,
            visualization_sample_size: DEFAULT_VISUALIZATION_SAMPLE_SIZE,
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl GraphConfig {
    /// Load config from file, then apply `KGRAPH_*` environment overrides.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = match std::fs::read_to_string(config_path) {
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                Error::Config(format!("{}: {}", config_path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", config_path.display());
                GraphConfig::default()
            }
            Err(e) => return Err(Error::Io(e)),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        info!(
            "Loaded config: min_confidence={}, max_nodes={}, sample_size={}",
            config.min_confidence, config.max_nodes, config.visualization_sample_size
        );
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("KGRAPH_MIN_CONFIDENCE") {
            self.min_confidence = parse_var("KGRAPH_MIN_CONFIDENCE", &v)?;
        }
        if let Some(v) = lookup("KGRAPH_MAX_NODES") {
            self.max_nodes = parse_var("KGRAPH_MAX_NODES", &v)?;
        }
        if let Some(v) = lookup("KGRAPH_VIZ_SAMPLE_SIZE") {
            self.visualization_sample_size = parse_var("KGRAPH_VIZ_SAMPLE_SIZE", &v)?;
        }
        if let Some(v) = lookup("KGRAPH_TOP_K") {
            self.top_k = parse_var("KGRAPH_TOP_K", &v)?;
        }
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(Error::Config(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.merge_threshold) {
            return Err(Error::Config(format!(
                "merge_threshold must be within [0, 1], got {}",
                self.merge_threshold
            )));
        }
        Ok(())
    }

    /// Save config to disk as pretty JSON.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has invalid value '{}'", name, value)))
}
