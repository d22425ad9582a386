//! Document data model and extension classification.
//!
//! A [`FileRecord`] is an immutable snapshot of filesystem metadata taken at
//! scan time. Records carry no identity beyond their path and are never
//! persisted between requests — every scan produces fresh records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension that marks a file as a document of interest.
///
/// Case-sensitive exact suffix match: `notes/todo.md` is a document,
/// `notes/todo.MD` is not.
pub const DOCUMENT_EXTENSION: &str = ".md";

/// Metadata snapshot for a single file found during a vault scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the vault root, always starting with `/`.
    pub path: String,
    /// Absolute path on disk.
    pub full_path: PathBuf,
    /// Modification time captured at scan time.
    pub modified_at: DateTime<Utc>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Whether the filename carries a recognized document extension.
    pub is_document: bool,
}

/// Check whether a path denotes a document of interest.
///
/// Pure function of the path string; no I/O. Current policy: the path ends
/// with `.md` exactly (case-sensitive).
pub fn is_document(path: &Path) -> bool {
    path.to_str()
        .map(|p| p.ends_with(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}
