//! Error types for the DOM capability boundary.

use thiserror::Error;

use crate::backend::NodeId;

/// Errors that can occur at the document boundary.
#[derive(Debug, Error)]
pub enum DomError {
    /// Selector syntax outside the supported subset. Callers treat this as
    /// "no match", never as a fatal condition.
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// The node handle no longer resolves to a live element.
    #[error("Node {0:?} is no longer attached")]
    DetachedNode(NodeId),

    /// Page fixture could not be parsed.
    #[error("Fixture parse error: {0}")]
    FixtureParse(#[from] serde_json::Error),
}

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;
