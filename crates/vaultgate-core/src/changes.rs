//! Change-window filtering over scan results.
//!
//! Given a scan snapshot and a reference timestamp, selects the documents
//! modified strictly after that timestamp, newest first. Pure functions of
//! their inputs; a fresh scan feeds every invocation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::document::FileRecord;

/// Default change window when the caller omits a timestamp: now minus 24h.
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Query parameters for the change filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChangeQuery {
    /// Reference timestamp; files modified strictly after it qualify.
    pub since: Option<DateTime<Utc>>,
}

impl ChangeQuery {
    /// Resolve the effective reference timestamp, applying the default
    /// 24-hour window when `since` is absent.
    pub fn effective_since(&self) -> DateTime<Utc> {
        self.since
            .unwrap_or_else(|| Utc::now() - Duration::hours(DEFAULT_WINDOW_HOURS))
    }
}

/// Select documents modified strictly after `since`, newest first.
///
/// A record qualifies iff it is a document and `modified_at > since`
/// (strict: a file modified exactly at `since` is excluded). Ties keep
/// traversal order (stable sort).
pub fn changed_since(records: Vec<FileRecord>, since: DateTime<Utc>) -> Vec<FileRecord> {
    let mut changed: Vec<FileRecord> = records
        .into_iter()
        .filter(|r| r.is_document && r.modified_at > since)
        .collect();
    changed.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    changed
}

/// Keep documents only and order them newest first.
///
/// Used by the full vault listing; same ordering contract as
/// [`changed_since`] without the time cutoff.
pub fn documents_newest_first(records: Vec<FileRecord>) -> Vec<FileRecord> {
    let mut documents: Vec<FileRecord> = records.into_iter().filter(|r| r.is_document).collect();
    documents.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    documents
}
