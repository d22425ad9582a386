//! # vaultgate-core
//!
//! Vault scanning, change detection, and mock search logic for the
//! vaultgate HTTP façade.
//!
//! Everything in this crate is a stateless, idempotent transformation over a
//! freshly captured filesystem snapshot: there is no index, no cache, and no
//! cross-request state. The HTTP layer lives in `vaultgate-api`.

pub mod changes;
pub mod document;
pub mod error;
pub mod search;
pub mod walker;

// Re-export commonly used types at crate root
pub use changes::{changed_since, documents_newest_first, ChangeQuery, DEFAULT_WINDOW_HOURS};
pub use document::{is_document, FileRecord, DOCUMENT_EXTENSION};
pub use error::{Error, Result};
pub use search::{MockSearchCatalog, SearchHit, DEFAULT_TOP_K};
pub use walker::VaultWalker;
