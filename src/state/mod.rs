// State management module
// Session controller and export file storage

pub mod session;
pub mod storage;

pub use session::{AudioStatus, ExportArtifact, Focus, Session, SessionError};
pub use storage::{calculate_sha256, store_export, StorageError, StoredExport};
