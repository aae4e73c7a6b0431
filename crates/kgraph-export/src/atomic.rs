//! Temp-file-then-rename publishing.

use std::io::Write;
use std::path::Path;

use kgraph_core::{Error, Result};
use tempfile::NamedTempFile;

/// Write `bytes` to `path` atomically. The temp file lives in the destination
/// directory so the final rename never crosses file systems.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| Error::Export(format!("{}: {}", path.display(), e.error)))?;
    Ok(())
}
