//! Relevance engine configuration.

use serde::Deserialize;

/// Tunables for the relevance engine. Defaults match production behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// Maximum candidates returned by a query analysis.
    pub max_candidates: usize,
    /// Maximum keywords considered per query.
    pub max_keywords: usize,
    /// Vertical margin (px) around the viewport within which elements
    /// still count as reachable.
    pub viewport_margin: f64,
    /// Snapshot text prefix length in characters.
    pub text_limit: usize,
    /// Page-structure cache lifetime in milliseconds.
    pub structure_cache_ttl_ms: u64,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            max_keywords: 5,
            viewport_margin: 500.0,
            text_limit: 100,
            structure_cache_ttl_ms: 5_000,
        }
    }
}
