//! Consolidation: enforce the node budget once ingestion has finished.
//!
//! Nodes are ranked by degree centrality with creation order breaking ties;
//! the top of the ranking survives and edges are reduced to the survivors.

pub mod pruner;
pub mod types;

pub use pruner::Pruner;
pub use types::PruneReport;
