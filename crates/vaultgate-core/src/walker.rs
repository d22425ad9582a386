//! Recursive vault enumeration.
//!
//! [`VaultWalker`] lists every regular file reachable under a root directory.
//! The walk is depth-first over an explicit work-list rather than call
//! recursion, so arbitrarily deep trees cannot exhaust the stack. Sibling
//! order is whatever the filesystem yields from `read_dir` — deterministic
//! for an unchanged tree, but not sorted.
//!
//! Error policy: abort-on-first-error. Any `read_dir` or metadata failure
//! fails the whole scan; there is no per-entry recovery and no partial
//! result. Symlinks are not followed — a symlink is recorded as a leaf
//! entry, never descended into.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::document::{is_document, FileRecord};
use crate::error::{Error, Result};

/// Walks a vault directory tree and snapshots file metadata.
///
/// The root is passed in explicitly at construction; there is no global
/// vault path. Each [`scan`](VaultWalker::scan) is independent and
/// self-contained — no state is shared between scans.
pub struct VaultWalker {
    root: PathBuf,
}

impl VaultWalker {
    /// Create a walker for the given vault root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The vault root this walker scans.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether the vault root currently exists.
    ///
    /// Used by the health probe; independent of any scan.
    pub fn root_exists(&self) -> bool {
        self.root.exists()
    }

    /// Enumerate every regular file under the root, at any depth.
    ///
    /// Directories themselves never appear in the output. Returns
    /// [`Error::RootNotFound`] when the root is missing at call time and
    /// [`Error::Io`] when any listing or stat call fails mid-scan.
    pub fn scan(&self) -> Result<Vec<FileRecord>> {
        if !self.root.exists() {
            return Err(Error::RootNotFound(self.root.clone()));
        }

        let mut records = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                let meta = entry.metadata()?;

                if meta.is_dir() {
                    pending.push(path);
                } else {
                    records.push(self.record_for(&path, &meta)?);
                }
            }
        }

        debug!(root = %self.root.display(), files = records.len(), "vault scan complete");
        Ok(records)
    }

    fn record_for(&self, path: &Path, meta: &fs::Metadata) -> Result<FileRecord> {
        let modified_at = system_time_to_utc(meta.modified()?);

        Ok(FileRecord {
            path: self.relative_path(path),
            full_path: path.to_path_buf(),
            modified_at,
            size_bytes: meta.len(),
            is_document: is_document(path),
        })
    }

    /// Strip the root prefix, keeping a leading `/` as the original did
    /// (`/vault/sub/b.md` under root `/vault` becomes `/sub/b.md`).
    fn relative_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => format!("/{}", rel.to_string_lossy()),
            Err(_) => path.to_string_lossy().into_owned(),
        }
    }
}

/// Convert a filesystem mtime to UTC.
///
/// Pre-epoch mtimes clamp to the epoch so an ancient file can never be
/// reported as recently modified.
fn system_time_to_utc(t: SystemTime) -> DateTime<Utc> {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => DateTime::from_timestamp(d.as_secs() as i64, d.subsec_nanos())
            .unwrap_or_else(Utc::now),
        Err(_) => DateTime::UNIX_EPOCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_scan_missing_root_is_root_not_found() {
        let walker = VaultWalker::new("/nonexistent/vault/path");
        match walker.scan() {
            Err(Error::RootNotFound(p)) => {
                assert_eq!(p, PathBuf::from("/nonexistent/vault/path"))
            }
            other => panic!("Expected RootNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_scan_empty_vault_yields_empty() {
        let vault = TempDir::new().unwrap();
        let records = VaultWalker::new(vault.path()).scan().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_scan_finds_nested_files_but_not_directories() {
        let vault = TempDir::new().unwrap();
        write_file(vault.path(), "a.md", "# a");
        write_file(vault.path(), "sub/b.md", "# b");
        write_file(vault.path(), "sub/deeper/c.txt", "c");

        let records = VaultWalker::new(vault.path()).scan().unwrap();
        let mut paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, vec!["/a.md", "/sub/b.md", "/sub/deeper/c.txt"]);
    }

    #[test]
    fn test_scan_sets_document_flag_and_size() {
        let vault = TempDir::new().unwrap();
        write_file(vault.path(), "note.md", "hello");
        write_file(vault.path(), "data.json", "{}");

        let records = VaultWalker::new(vault.path()).scan().unwrap();
        let note = records.iter().find(|r| r.path == "/note.md").unwrap();
        let data = records.iter().find(|r| r.path == "/data.json").unwrap();

        assert!(note.is_document);
        assert_eq!(note.size_bytes, 5);
        assert!(!data.is_document);
        assert_eq!(data.size_bytes, 2);
    }

    #[test]
    fn test_scan_is_idempotent_on_unchanged_tree() {
        let vault = TempDir::new().unwrap();
        write_file(vault.path(), "a.md", "# a");
        write_file(vault.path(), "sub/b.md", "# b");

        let walker = VaultWalker::new(vault.path());
        let mut first = walker.scan().unwrap();
        let mut second = walker.scan().unwrap();
        first.sort_by(|a, b| a.path.cmp(&b.path));
        second.sort_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(first, second);
    }

    #[test]
    fn test_relative_paths_have_root_stripped() {
        let vault = TempDir::new().unwrap();
        write_file(vault.path(), "sub/b.md", "# b");

        let records = VaultWalker::new(vault.path()).scan().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/sub/b.md");
        assert_eq!(records[0].full_path, vault.path().join("sub/b.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_aborts_whole_scan() {
        use std::os::unix::fs::PermissionsExt;

        let vault = TempDir::new().unwrap();
        write_file(vault.path(), "a.md", "# a");
        write_file(vault.path(), "locked/b.md", "# b");
        let locked = vault.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits are not enforced for root; nothing to verify then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = VaultWalker::new(vault.path()).scan();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // No partial result: one bad entry fails the entire scan.
        match result {
            Err(Error::Io(_)) => {}
            Err(other) => panic!("Expected Io error, got {:?}", other),
            Ok(records) => panic!("Expected Io error, got {} records", records.len()),
        }
    }

    #[test]
    fn test_pre_epoch_mtime_clamps_to_epoch() {
        let t = UNIX_EPOCH - std::time::Duration::from_secs(10);
        assert_eq!(system_time_to_utc(t), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_post_epoch_mtime_converts_exactly() {
        let t = UNIX_EPOCH + std::time::Duration::new(86_400, 500_000_000);
        let converted = system_time_to_utc(t);
        assert_eq!(converted, DateTime::from_timestamp(86_400, 500_000_000).unwrap());
    }

    #[test]
    fn test_root_exists_probe() {
        let vault = TempDir::new().unwrap();
        assert!(VaultWalker::new(vault.path()).root_exists());
        assert!(!VaultWalker::new("/nonexistent/vault/path").root_exists());
    }
}
