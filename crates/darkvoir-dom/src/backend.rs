//! The `DomBackend` capability trait and its vocabulary types.

use serde::{Deserialize, Serialize};

use crate::error::DomResult;
use crate::geometry::{BoundingBox, ViewportInfo};

/// Opaque handle to a live node. Non-owning: a handle may stop resolving
/// when the page changes, and must be re-resolved before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Synthetic events the guide engine dispatches during action execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticEvent {
    Input,
    Change,
    MouseEnter,
    MouseOver,
}

impl SyntheticEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change => "change",
            Self::MouseEnter => "mouseenter",
            Self::MouseOver => "mouseover",
        }
    }
}

/// The kinds of overlay nodes the guide engine renders. Each kind carries
/// a fixed, reserved class name so `stop()` can sweep them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Dark scrim behind the highlighted element.
    Scrim,
    /// Highlight box around the target.
    Highlight,
    /// Message bubble.
    Message,
    /// Pointer glyph above the target.
    Pointer,
    /// "Step i of N" indicator.
    StepIndicator,
    /// Previous/Next/Exit control bar.
    Controls,
}

impl OverlayKind {
    pub fn base_class(&self) -> &'static str {
        match self {
            Self::Scrim => "dark-voir-overlay",
            Self::Highlight => "dark-voir-highlight",
            Self::Message => "dark-voir-message",
            Self::Pointer => "dark-voir-pointer",
            Self::StepIndicator => "dark-voir-step-indicator",
            Self::Controls => "dark-voir-controls",
        }
    }
}

/// Every reserved overlay class. After `stop()` no node on the page may
/// carry any of these.
pub const RESERVED_CLASSES: [&str; 6] = [
    "dark-voir-overlay",
    "dark-voir-highlight",
    "dark-voir-message",
    "dark-voir-pointer",
    "dark-voir-step-indicator",
    "dark-voir-controls",
];

/// Description of an overlay node to insert.
#[derive(Debug, Clone)]
pub struct OverlaySpec {
    pub kind: OverlayKind,
    /// Modifier classes appended after the reserved base class.
    pub extra_classes: Vec<String>,
    pub text: Option<String>,
    /// Fixed-position rectangle in viewport coordinates.
    pub rect: Option<BoundingBox>,
    pub attributes: Vec<(String, String)>,
}

impl OverlaySpec {
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            extra_classes: Vec::new(),
            text: None,
            rect: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.extra_classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_rect(mut self, rect: BoundingBox) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Narrow capability interface over a live document and its layout.
///
/// Query methods accept the CSS subset documented on [`crate::SelectorList`];
/// anything outside it surfaces as `DomError::UnsupportedSelector`, which
/// callers treat as "no match". Geometry is reported in viewport
/// coordinates; document coordinates are derived via [`ViewportInfo`]
/// scroll offsets.
pub trait DomBackend: Send + Sync {
    // Page-level information.
    fn url(&self) -> String;
    fn title(&self) -> String;
    fn viewport(&self) -> ViewportInfo;

    // Queries.
    fn query(&self, selector: &str) -> DomResult<Option<NodeId>>;
    fn query_all(&self, selector: &str) -> DomResult<Vec<NodeId>>;
    /// Whether the handle still resolves to a live element.
    fn exists(&self, node: NodeId) -> bool;

    // Inspection.
    fn tag_name(&self, node: NodeId) -> Option<String>;
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn classes(&self, node: NodeId) -> Vec<String>;
    /// Text content of the node and its descendants, whitespace-trimmed.
    fn text_content(&self, node: NodeId) -> String;
    fn value(&self, node: NodeId) -> Option<String>;
    fn computed_style(&self, node: NodeId, property: &str) -> Option<String>;
    fn is_disabled(&self, node: NodeId) -> bool;
    fn has_inline_click_handler(&self, node: NodeId) -> bool;
    /// Tag names of the nearest ancestors, closest first, at most `max`.
    fn ancestor_tags(&self, node: NodeId, max: usize) -> Vec<String>;

    // Geometry.
    fn bounding_box(&self, node: NodeId) -> BoundingBox;
    fn scroll_into_view(&self, node: NodeId);

    // Mutation.
    fn set_value(&self, node: NodeId, value: &str);
    fn focus(&self, node: NodeId);
    fn click(&self, node: NodeId) -> DomResult<()>;
    fn dispatch(&self, node: NodeId, event: SyntheticEvent) -> DomResult<()>;

    // Overlay management.
    fn insert_overlay(&self, spec: OverlaySpec) -> NodeId;
    fn set_overlay_text(&self, node: NodeId, text: &str);
    fn set_overlay_rect(&self, node: NodeId, rect: BoundingBox);
    fn add_class(&self, node: NodeId, class: &str);
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn remove_node(&self, node: NodeId);
    fn nodes_with_class(&self, class: &str) -> Vec<NodeId>;
}
