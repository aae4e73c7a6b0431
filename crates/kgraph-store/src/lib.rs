//! kgraph store: deduplicated, weighted entity graph backed by petgraph.

mod entities;
pub mod graph;
pub mod ranking;
mod relations;
pub mod snapshot;
pub mod stats;
pub mod types;

pub use entities::Upsert;
pub use graph::KnowledgeGraph;
pub use ranking::RankedNode;
pub use relations::{RelationOutcome, CO_OCCURS};
pub use snapshot::{GraphSnapshot, SnapshotEdge, SNAPSHOT_FORMAT_VERSION};
pub use stats::GraphStats;
pub use types::*;
