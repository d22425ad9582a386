//! Mock semantic search catalog.
//!
//! Stands in for the semantic search CLI until the real integration lands.
//! The catalog serves canned hits and a fixed index inventory; no index is
//! ever built and no external process is invoked. Responses are flagged
//! `mock` at the API boundary so consumers cannot mistake them for real
//! search results.

use serde::{Deserialize, Serialize};

/// Default number of hits returned when the caller omits `top_k`.
pub const DEFAULT_TOP_K: usize = 5;

/// Queries containing any of these keywords always match every canned hit,
/// so downstream automation has a reliable way to exercise the endpoint.
const PASSTHROUGH_KEYWORDS: &[&str] = &["para", "zettelkasten", "automation", "conceito"];

/// A single search hit: relevance score plus the matched content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: f64,
    pub content: String,
}

/// Canned search results and index inventory.
#[derive(Debug, Clone)]
pub struct MockSearchCatalog {
    hits: Vec<SearchHit>,
    indexes: Vec<String>,
}

impl Default for MockSearchCatalog {
    fn default() -> Self {
        Self {
            hits: vec![
                SearchHit {
                    score: 0.95,
                    content: "# PARA System - Projects and Areas\n\nThe PARA method \
                              (Projects, Areas, Resources, Archives) organizes notes by \
                              actionability.\n\n## Active Projects\n- Search CLI integration \
                              with the workflow engine\n- Automated knowledge discovery\n- \
                              Smart notification pipeline"
                        .to_string(),
                },
                SearchHit {
                    score: 0.87,
                    content: "# Zettelkasten - Knowledge Management\n\nInterlinked note \
                              system for capturing and developing ideas.\n\n## New \
                              Connections\n- Workflow automation + knowledge management\n- \
                              Semantic search + PARA organization\n- Vault monitoring + \
                              editor integration"
                        .to_string(),
                },
                SearchHit {
                    score: 0.82,
                    content: "# Activity Agent Metrics\n\nActivity agent that watches the \
                              vault and processes newly created notes.\n\n## Recent \
                              Insights\n- More notes created about automation\n- Frequent \
                              links between AI and productivity topics\n- Usage patterns \
                              pointing at system integration work"
                        .to_string(),
                },
            ],
            indexes: vec!["myvault".to_string()],
        }
    }
}

impl MockSearchCatalog {
    /// Names of the indexes the catalog pretends to hold.
    pub fn indexes(&self) -> &[String] {
        &self.indexes
    }

    /// Render the index inventory the way the CLI's `list` command would.
    pub fn render_listing(&self) -> String {
        let mut out = String::from("Semantic Search Indexes\n");
        out.push_str(&"=".repeat(50));
        out.push('\n');
        for (i, name) in self.indexes.iter().enumerate() {
            out.push_str(&format!("{}. {} [ready]\n", i + 1, name));
        }
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!("Total: {} indexes", self.indexes.len()));
        out
    }

    /// Return hits matching `query`, truncated to `top_k`.
    ///
    /// A hit matches when its content contains the query case-insensitively,
    /// or when the query contains one of the pass-through keywords.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let query_lower = query.to_lowercase();
        let passthrough = PASSTHROUGH_KEYWORDS.iter().any(|k| query_lower.contains(k));

        self.hits
            .iter()
            .filter(|hit| passthrough || hit.content.to_lowercase().contains(&query_lower))
            .take(top_k)
            .cloned()
            .collect()
    }
}
