//! Candidate elements: scored, metadata-snapshotted references to nodes
//! considered relevant to a query.

use darkvoir_dom::{BoundingBox, NodeId};
use serde::{Deserialize, Serialize};

/// Coarse classification of a user request, used to bias downstream
/// element search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    FindElement,
    DoAction,
    FixError,
    Explain,
    General,
}

/// Metadata snapshot of a page element, taken at scan time.
///
/// The `node` handle is non-owning: it may stop resolving when the page
/// changes, and must be re-resolved before any mutation. Everything else
/// is a value captured at snapshot time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateElement {
    pub node: NodeId,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Visible text, truncated to 100 characters.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Generated selector for re-resolution.
    pub selector: String,
    /// Nearest ancestor tags, outermost first, e.g. `"nav > ul > li"`.
    pub ancestor_path: String,
    pub viewport_rect: BoundingBox,
    pub document_rect: BoundingBox,
    pub visible: bool,
    pub clickable: bool,
    pub is_input: bool,
    pub disabled: bool,
    pub required: bool,
}
