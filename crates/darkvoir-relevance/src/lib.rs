//! # DarkVoir Relevance
//!
//! Ranks candidate interactive elements on an arbitrary page against a
//! natural-language query: intent classification, keyword extraction,
//! pool scanning, interactivity filtering, dedup, clickable-first
//! ordering, and metadata snapshots for the planner.

mod analyzer;
mod config;
mod error;
mod intent;
mod keywords;
mod matcher;
mod metadata;
mod prompt;

pub use analyzer::DomAnalyzer;
pub use config::RelevanceConfig;
pub use error::{RelevanceError, RelevanceResult};
pub use intent::detect_intent;
pub use keywords::extract_keywords;
pub use matcher::{element_matches_keyword, is_clickable, is_element_interactive, is_element_visible};
pub use metadata::{element_metadata, generate_selector};
pub use prompt::render_for_prompt;
