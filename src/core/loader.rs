//! File-acquisition boundary.
//!
//! The only place a hard error surfaces: a wrong extension or an unreadable
//! file is reported distinctly and leaves nothing half-loaded. Everything
//! downstream of the returned text is best-effort.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("not a CSV file: {0} (expected a .csv extension)")]
    NotCsv(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a usage export into memory, enforcing the `.csv` extension
/// (case-insensitive) before touching the filesystem.
pub fn load(path: &Path) -> Result<String, LoadError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(LoadError::NotCsv(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
