//! kgraph export: serialized forms of a finished graph.
//!
//! Every file is written to a temporary sibling and atomically persisted, so
//! a failed export never leaves a partial file at the destination.

pub mod atomic;
pub mod exporter;
pub mod flat;
pub mod graphml;
pub mod viz;

pub use atomic::write_atomic;
pub use exporter::{load_flat, load_snapshot, ExportPaths, Exporter};
pub use flat::{flatten_list, FlatEdge, FlatGraph, FlatNode, FlatValue};
pub use graphml::write_graphml;
pub use viz::{VisEdge, VisGraph, VisNode};
