//! Relevance engine errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelevanceError {
    /// Snapshot extraction failed for one element; the element is dropped
    /// from the results, never propagated.
    #[error("Metadata extraction failed: {0}")]
    MetadataExtraction(String),
}

pub type RelevanceResult<T> = Result<T, RelevanceError>;
