//! Extraction record discovery and loading.

use std::path::{Path, PathBuf};

use kgraph_core::{Error, Result};
use tracing::debug;

use crate::record::ExtractionRecord;

/// File name suffix of extraction records.
pub const RECORD_SUFFIX: &str = "_entities.json";

/// Record files in `dir`, sorted by file name so runs are reproducible.
pub fn discover_records(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| e.file_name().to_string_lossy().ends_with(RECORD_SUFFIX))
        .map(|e| e.path())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} extraction records in {}", files.len(), dir.display());
    Ok(files)
}

/// Read and parse one record. Any failure is a malformed record.
pub fn load_record(path: &Path) -> Result<ExtractionRecord> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::MalformedRecord(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| Error::MalformedRecord(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_entities.json", "a_entities.json", "notes.json", "c_entities.json"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("d_entities.json")).unwrap();

        let files = discover_records(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_entities.json", "b_entities.json", "c_entities.json"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_records(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_load_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x_entities.json");
        std::fs::write(
            &path,
            r#"{"doc_id": "x", "entities": [{"text": "A", "label": "T", "confidence": 0.9}]}"#,
        )
        .unwrap();
        let record = load_record(&path).unwrap();
        assert_eq!(record.doc_id, "x");
        assert_eq!(record.entities.len(), 1);
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_entities.json");
        std::fs::write(&path, "{ truncated").unwrap();
        assert!(matches!(load_record(&path), Err(Error::MalformedRecord(_))));
        assert!(matches!(
            load_record(&dir.path().join("absent_entities.json")),
            Err(Error::MalformedRecord(_))
        ));
    }
}
