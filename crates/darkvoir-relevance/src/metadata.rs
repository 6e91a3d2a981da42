//! Candidate metadata snapshots and selector generation.

use darkvoir_dom::{DomBackend, NodeId};
use darkvoir_protocols::CandidateElement;
use tracing::debug;

use crate::error::{RelevanceError, RelevanceResult};
use crate::matcher::{is_clickable, is_element_visible};

/// Generate a selector for re-resolving the node later, by priority:
/// `#id`, `[data-testid=…]`, `[aria-label=…]`, `[name=…]`, tag plus up to
/// two classes, bare tag.
pub fn generate_selector(backend: &dyn DomBackend, node: NodeId) -> String {
    if let Some(id) = backend.attribute(node, "id") {
        if !id.is_empty() {
            return format!("#{id}");
        }
    }
    if let Some(testid) = backend.attribute(node, "data-testid") {
        return format!("[data-testid=\"{testid}\"]");
    }
    if let Some(label) = backend.attribute(node, "aria-label") {
        return format!("[aria-label=\"{label}\"]");
    }
    if let Some(name) = backend.attribute(node, "name") {
        return format!("[name=\"{name}\"]");
    }
    let tag = backend.tag_name(node).unwrap_or_else(|| "div".to_string());
    let classes = backend.classes(node);
    if classes.is_empty() {
        tag
    } else {
        let suffix: Vec<&str> = classes.iter().take(2).map(String::as_str).collect();
        format!("{tag}.{}", suffix.join("."))
    }
}

/// Build the full metadata snapshot for one node.
///
/// Extraction failures drop the element from the results; they never
/// propagate to the caller.
pub fn element_metadata(
    backend: &dyn DomBackend,
    node: NodeId,
    text_limit: usize,
) -> RelevanceResult<CandidateElement> {
    let tag = backend.tag_name(node).ok_or_else(|| {
        RelevanceError::MetadataExtraction(format!("node {} detached during scan", node.as_raw()))
    })?;

    let viewport = backend.viewport();
    let viewport_rect = backend.bounding_box(node);
    let document_rect = viewport_rect.translate(viewport.scroll_x, viewport.scroll_y);

    let text: String = backend.text_content(node).chars().take(text_limit).collect();
    let mut ancestors = backend.ancestor_tags(node, 3);
    ancestors.reverse();

    let snapshot = CandidateElement {
        node,
        id: backend.attribute(node, "id"),
        classes: backend.classes(node),
        text,
        aria_label: backend.attribute(node, "aria-label"),
        title: backend.attribute(node, "title"),
        name: backend.attribute(node, "name"),
        value: backend.value(node),
        selector: generate_selector(backend, node),
        ancestor_path: ancestors.join(" > "),
        viewport_rect,
        document_rect,
        visible: is_element_visible(backend, node),
        clickable: is_clickable(backend, node),
        is_input: matches!(tag.as_str(), "input" | "textarea" | "select"),
        disabled: backend.is_disabled(node),
        required: backend.attribute(node, "required").is_some(),
        tag,
    };
    debug!(selector = %snapshot.selector, "captured element snapshot");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkvoir_dom::{VirtualDom, VirtualNodeSpec};

    #[test]
    fn test_selector_prefers_id() {
        let dom = VirtualDom::new("https://example.com", "t");
        let node = dom.add_node(
            None,
            VirtualNodeSpec::new("button")
                .with_attr("id", "save")
                .with_attr("aria-label", "Save document")
                .with_attr("class", "btn"),
        );
        assert_eq!(generate_selector(&dom, node), "#save");
    }

    #[test]
    fn test_selector_fallback_chain() {
        let dom = VirtualDom::new("https://example.com", "t");
        let testid = dom.add_node(
            None,
            VirtualNodeSpec::new("button").with_attr("data-testid", "cta"),
        );
        let labeled = dom.add_node(
            None,
            VirtualNodeSpec::new("button").with_attr("aria-label", "Close"),
        );
        let named = dom.add_node(None, VirtualNodeSpec::new("input").with_attr("name", "email"));
        let classed = dom.add_node(
            None,
            VirtualNodeSpec::new("button").with_attr("class", "btn primary large"),
        );
        let bare = dom.add_node(None, VirtualNodeSpec::new("textarea"));

        assert_eq!(generate_selector(&dom, testid), "[data-testid=\"cta\"]");
        assert_eq!(generate_selector(&dom, labeled), "[aria-label=\"Close\"]");
        assert_eq!(generate_selector(&dom, named), "[name=\"email\"]");
        // At most two classes.
        assert_eq!(generate_selector(&dom, classed), "button.btn.primary");
        assert_eq!(generate_selector(&dom, bare), "textarea");
    }

    #[test]
    fn test_generated_id_selector_resolves_back() {
        let dom = VirtualDom::new("https://example.com", "t");
        let node = dom.add_node(None, VirtualNodeSpec::new("button").with_attr("id", "pay"));
        let selector = generate_selector(&dom, node);
        assert_eq!(dom.query(&selector).unwrap(), Some(node));
    }

    #[test]
    fn test_metadata_snapshot_fields() {
        let dom = VirtualDom::new("https://example.com", "t");
        let form = dom.add_node(None, VirtualNodeSpec::new("form"));
        let node = dom.add_node(
            Some(form),
            VirtualNodeSpec::new("input")
                .with_attr("id", "email")
                .with_attr("required", "")
                .with_attr("placeholder", "Email")
                .with_rect(10.0, 900.0, 200.0, 40.0),
        );
        let meta = element_metadata(&dom, node, 100).unwrap();
        assert_eq!(meta.tag, "input");
        assert_eq!(meta.selector, "#email");
        assert_eq!(meta.ancestor_path, "form");
        assert!(meta.is_input);
        assert!(meta.required);
        assert!(!meta.clickable);
        assert_eq!(meta.document_rect.y, 900.0);
    }

    #[test]
    fn test_text_prefix_truncation() {
        let dom = VirtualDom::new("https://example.com", "t");
        let node = dom.add_node(
            None,
            VirtualNodeSpec::new("a").with_text("x".repeat(300)),
        );
        let meta = element_metadata(&dom, node, 100).unwrap();
        assert_eq!(meta.text.len(), 100);
    }

    #[test]
    fn test_detached_node_is_an_error() {
        let dom = VirtualDom::new("https://example.com", "t");
        let node = dom.add_node(None, VirtualNodeSpec::new("button"));
        dom.remove_node(node);
        assert!(element_metadata(&dom, node, 100).is_err());
    }
}
