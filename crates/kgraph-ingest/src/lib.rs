//! kgraph ingest: extraction records → entity graph.

pub mod builder;
pub mod file;
pub mod linker;
pub mod record;

pub use builder::{BuildOutcome, GraphBuilder, IngestReport, SkippedDocument};
pub use file::{discover_records, load_record};
pub use linker::{CooccurrenceLinker, LinkSummary};
pub use record::ExtractionRecord;
