//! In-memory `DomBackend` implementation.
//!
//! `VirtualDom` holds a static node tree with explicit geometry and styles,
//! deserialisable from JSON fixtures. It records dispatched events and
//! scroll requests so tests can assert on engine side effects without a
//! real browser.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{DomBackend, NodeId, OverlaySpec, SyntheticEvent};
use crate::error::{DomError, DomResult};
use crate::geometry::{BoundingBox, ViewportInfo};
use crate::selector::{AttrCondition, CompoundSelector, SelectorList};

/// One element in a JSON page fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualNodeSpec {
    pub tag: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    /// Own text (descendant text is aggregated on read).
    #[serde(default)]
    pub text: String,
    /// Bounding rectangle in document coordinates.
    #[serde(default)]
    pub rect: BoundingBox,
    #[serde(default)]
    pub styles: HashMap<String, String>,
    #[serde(default)]
    pub children: Vec<VirtualNodeSpec>,
}

impl VirtualNodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: HashMap::new(),
            text: String::new(),
            rect: BoundingBox::default(),
            styles: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = BoundingBox::new(x, y, width, height);
        self
    }

    pub fn with_style(mut self, prop: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(prop.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: VirtualNodeSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// A whole page fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFixture {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub viewport: ViewportInfo,
    #[serde(default)]
    pub body: Vec<VirtualNodeSpec>,
}

#[derive(Debug, Clone)]
struct VirtualNode {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    /// Document coordinates for regular nodes, viewport coordinates for
    /// fixed-position overlay nodes.
    rect: BoundingBox,
    styles: HashMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    fixed: bool,
}

#[derive(Debug, Default)]
struct DomState {
    nodes: HashMap<NodeId, VirtualNode>,
    /// Pre-order document order, queries iterate this.
    order: Vec<NodeId>,
    viewport: ViewportInfo,
    url: String,
    title: String,
    next_id: u64,
    events: Vec<(NodeId, String)>,
    scrolls: Vec<NodeId>,
    focused: Option<NodeId>,
}

impl DomState {
    fn alloc(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::from_raw(self.next_id)
    }

    fn insert_spec(&mut self, parent: Option<NodeId>, spec: &VirtualNodeSpec) -> NodeId {
        let id = self.alloc();
        self.nodes.insert(
            id,
            VirtualNode {
                tag: spec.tag.to_ascii_lowercase(),
                attrs: spec.attrs.clone(),
                text: spec.text.clone(),
                rect: spec.rect,
                styles: spec.styles.clone(),
                parent,
                children: Vec::new(),
                fixed: false,
            },
        );
        self.order.push(id);
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.push(id);
            }
        }
        for child in &spec.children {
            self.insert_spec(Some(id), child);
        }
        id
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<String>) {
        if let Some(node) = self.nodes.get(&id) {
            let own = node.text.trim();
            if !own.is_empty() {
                out.push(own.to_string());
            }
            for child in &node.children {
                self.collect_text(*child, out);
            }
        }
    }

    fn matches(&self, id: NodeId, sel: &CompoundSelector) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if let Some(ref tag) = sel.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(ref wanted) = sel.id {
            if node.attrs.get("id") != Some(wanted) {
                return false;
            }
        }
        if !sel.classes.is_empty() {
            let classes: Vec<&str> = node
                .attrs
                .get("class")
                .map(|c| c.split_whitespace().collect())
                .unwrap_or_default();
            if !sel.classes.iter().all(|c| classes.contains(&c.as_str())) {
                return false;
            }
        }
        for cond in &sel.attrs {
            match cond {
                AttrCondition::Exists(name) => {
                    if !node.attrs.contains_key(name) {
                        return false;
                    }
                }
                AttrCondition::Equals(name, value) => {
                    if node.attrs.get(name) != Some(value) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            self.order.retain(|n| *n != id);
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

/// In-memory page implementing [`DomBackend`].
pub struct VirtualDom {
    state: RwLock<DomState>,
}

impl VirtualDom {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let state = DomState {
            url: url.into(),
            title: title.into(),
            viewport: ViewportInfo::default(),
            ..Default::default()
        };
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn from_fixture(fixture: &PageFixture) -> Self {
        let dom = Self::new(fixture.url.clone(), fixture.title.clone());
        {
            let mut state = dom.state.write();
            state.viewport = fixture.viewport;
            for spec in &fixture.body {
                state.insert_spec(None, spec);
            }
        }
        dom
    }

    pub fn from_json_str(json: &str) -> DomResult<Self> {
        let fixture: PageFixture = serde_json::from_str(json).map_err(DomError::FixtureParse)?;
        Ok(Self::from_fixture(&fixture))
    }

    /// Add an element under `parent` (or at top level), returning its handle.
    pub fn add_node(&self, parent: Option<NodeId>, spec: VirtualNodeSpec) -> NodeId {
        self.state.write().insert_spec(parent, &spec)
    }

    pub fn set_viewport(&self, viewport: ViewportInfo) {
        self.state.write().viewport = viewport;
    }

    /// Dispatched synthetic events, oldest first, as (node, event name).
    pub fn recorded_events(&self) -> Vec<(NodeId, String)> {
        self.state.read().events.clone()
    }

    /// Nodes that were scrolled into view, oldest first.
    pub fn scrolled_nodes(&self) -> Vec<NodeId> {
        self.state.read().scrolls.clone()
    }

    pub fn focused_node(&self) -> Option<NodeId> {
        self.state.read().focused
    }

    fn record(&self, node: NodeId, name: &str) {
        self.state.write().events.push((node, name.to_string()));
    }
}

impl DomBackend for VirtualDom {
    fn url(&self) -> String {
        self.state.read().url.clone()
    }

    fn title(&self) -> String {
        self.state.read().title.clone()
    }

    fn viewport(&self) -> ViewportInfo {
        self.state.read().viewport
    }

    fn query(&self, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let state = self.state.read();
        Ok(state
            .order
            .iter()
            .copied()
            .filter(|id| list.0.iter().any(|sel| state.matches(*id, sel)))
            .collect())
    }

    fn exists(&self, node: NodeId) -> bool {
        self.state.read().nodes.contains_key(&node)
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.state.read().nodes.get(&node).map(|n| n.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state
            .read()
            .nodes
            .get(&node)
            .and_then(|n| n.attrs.get(name).cloned())
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> String {
        let state = self.state.read();
        let mut parts = Vec::new();
        state.collect_text(node, &mut parts);
        parts.join(" ")
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.attribute(node, "value")
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        self.state
            .read()
            .nodes
            .get(&node)
            .and_then(|n| n.styles.get(property).cloned())
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.state
            .read()
            .nodes
            .get(&node)
            .is_some_and(|n| n.attrs.contains_key("disabled"))
    }

    fn has_inline_click_handler(&self, node: NodeId) -> bool {
        self.state
            .read()
            .nodes
            .get(&node)
            .is_some_and(|n| n.attrs.contains_key("onclick"))
    }

    fn ancestor_tags(&self, node: NodeId, max: usize) -> Vec<String> {
        let state = self.state.read();
        let mut tags = Vec::new();
        let mut current = state.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            if tags.len() >= max {
                break;
            }
            let Some(n) = state.nodes.get(&id) else { break };
            tags.push(n.tag.clone());
            current = n.parent;
        }
        tags
    }

    fn bounding_box(&self, node: NodeId) -> BoundingBox {
        let state = self.state.read();
        match state.nodes.get(&node) {
            Some(n) if n.fixed => n.rect,
            Some(n) => n.rect.translate(-state.viewport.scroll_x, -state.viewport.scroll_y),
            None => BoundingBox::default(),
        }
    }

    fn scroll_into_view(&self, node: NodeId) {
        let mut state = self.state.write();
        let Some(n) = state.nodes.get(&node) else {
            return;
        };
        let (cx, cy) = n.rect.center();
        let (w, h) = (state.viewport.width, state.viewport.height);
        state.viewport.scroll_x = (cx - w / 2.0).max(0.0);
        state.viewport.scroll_y = (cy - h / 2.0).max(0.0);
        state.scrolls.push(node);
        debug!(node = node.as_raw(), "scrolled into view");
    }

    fn set_value(&self, node: NodeId, value: &str) {
        if let Some(n) = self.state.write().nodes.get_mut(&node) {
            n.attrs.insert("value".to_string(), value.to_string());
        }
    }

    fn focus(&self, node: NodeId) {
        let mut state = self.state.write();
        if state.nodes.contains_key(&node) {
            state.focused = Some(node);
            state.events.push((node, "focus".to_string()));
        }
    }

    fn click(&self, node: NodeId) -> DomResult<()> {
        if !self.exists(node) {
            return Err(DomError::DetachedNode(node));
        }
        self.record(node, "click");
        Ok(())
    }

    fn dispatch(&self, node: NodeId, event: SyntheticEvent) -> DomResult<()> {
        if !self.exists(node) {
            return Err(DomError::DetachedNode(node));
        }
        self.record(node, event.name());
        Ok(())
    }

    fn insert_overlay(&self, spec: OverlaySpec) -> NodeId {
        let mut state = self.state.write();
        let id = state.alloc();
        let mut classes = vec![spec.kind.base_class().to_string()];
        classes.extend(spec.extra_classes.iter().cloned());
        let mut attrs: HashMap<String, String> = spec.attributes.iter().cloned().collect();
        attrs.insert("class".to_string(), classes.join(" "));
        state.nodes.insert(
            id,
            VirtualNode {
                tag: "div".to_string(),
                attrs,
                text: spec.text.unwrap_or_default(),
                rect: spec.rect.unwrap_or_default(),
                styles: HashMap::new(),
                parent: None,
                children: Vec::new(),
                fixed: true,
            },
        );
        state.order.push(id);
        id
    }

    fn set_overlay_text(&self, node: NodeId, text: &str) {
        if let Some(n) = self.state.write().nodes.get_mut(&node) {
            n.text = text.to_string();
        }
    }

    fn set_overlay_rect(&self, node: NodeId, rect: BoundingBox) {
        if let Some(n) = self.state.write().nodes.get_mut(&node) {
            n.rect = rect;
        }
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(n) = self.state.write().nodes.get_mut(&node) {
            let existing = n.attrs.entry("class".to_string()).or_default();
            if !existing.split_whitespace().any(|c| c == class) {
                if !existing.is_empty() {
                    existing.push(' ');
                }
                existing.push_str(class);
            }
        }
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.state.write().nodes.get_mut(&node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_node(&self, node: NodeId) {
        self.state.write().remove_subtree(node);
    }

    fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        let state = self.state.read();
        state
            .order
            .iter()
            .copied()
            .filter(|id| {
                state.nodes.get(id).is_some_and(|n| {
                    n.attrs
                        .get("class")
                        .is_some_and(|c| c.split_whitespace().any(|t| t == class))
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "virtual_dom_tests.rs"]
mod tests;
