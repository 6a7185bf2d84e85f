// Export storage - MIDI artifacts on disk
// Files land in the export directory with their SHA-256 digest recorded

use sha2::{Digest, Sha256};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A file written to the export directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredExport {
    pub path: PathBuf,
    pub sha256: String,
    pub size: usize,
}

/// Create the export directory if needed
pub fn ensure_dir(dir: &Path) -> StorageResult<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Write bytes under `dir` and return the path and SHA256 hash
///
/// `filename` must be a bare name; separators and `..` are refused so an
/// export can never land outside the directory.
pub fn store_export(dir: &Path, filename: &str, data: &[u8]) -> StorageResult<StoredExport> {
    if filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename == "."
        || filename == ".."
    {
        return Err(StorageError::InvalidName(filename.to_string()));
    }

    let dir = ensure_dir(dir)?;
    let file_path = dir.join(filename);
    let mut file = fs::File::create(&file_path)?;
    file.write_all(data)?;
    file.flush()?;

    log::info!("Wrote {} ({} bytes)", file_path.display(), data.len());

    Ok(StoredExport {
        path: file_path,
        sha256: calculate_sha256(data),
        size: data.len(),
    })
}

/// Calculate SHA256 hash of data
pub fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
