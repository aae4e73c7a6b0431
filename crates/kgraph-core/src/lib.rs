//! kgraph core: error type, build configuration, data directory layout.

pub mod config;
pub mod error;

pub use config::{DataPaths, GraphConfig};
pub use error::{Error, Result};
