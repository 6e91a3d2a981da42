//! Element/keyword matching and interactivity predicates.

use darkvoir_dom::{DomBackend, NodeId};

/// Case-insensitive substring match of a keyword against the element's
/// textual surfaces: visible text, placeholder, aria-label, title, value,
/// id, name, aria-describedby. Literal containment only, no semantic
/// matching.
pub fn element_matches_keyword(backend: &dyn DomBackend, node: NodeId, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let surfaces = [
        Some(backend.text_content(node)),
        backend.attribute(node, "placeholder"),
        backend.attribute(node, "aria-label"),
        backend.attribute(node, "title"),
        backend.value(node),
        backend.attribute(node, "id"),
        backend.attribute(node, "name"),
        backend.attribute(node, "aria-describedby"),
    ];
    surfaces
        .into_iter()
        .flatten()
        .any(|surface| surface.to_lowercase().contains(&keyword))
}

/// Style-level visibility: not display:none, not visibility:hidden, not
/// fully transparent.
pub fn is_element_visible(backend: &dyn DomBackend, node: NodeId) -> bool {
    if backend.computed_style(node, "display").as_deref() == Some("none") {
        return false;
    }
    if backend.computed_style(node, "visibility").as_deref() == Some("hidden") {
        return false;
    }
    if let Some(opacity) = backend.computed_style(node, "opacity") {
        if opacity.parse::<f64>().map(|o| o == 0.0).unwrap_or(false) {
            return false;
        }
    }
    true
}

/// Whether the element is worth guiding a user to: it has area, sits
/// within the viewport expanded by `margin` px vertically, is visible,
/// and is not disabled.
pub fn is_element_interactive(backend: &dyn DomBackend, node: NodeId, margin: f64) -> bool {
    let rect = backend.bounding_box(node);
    if rect.is_empty() {
        return false;
    }
    if !rect.within_expanded_viewport(&backend.viewport(), margin) {
        return false;
    }
    if !is_element_visible(backend, node) {
        return false;
    }
    !backend.is_disabled(node)
}

const CLICKABLE_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "checkbox", "radio", "image"];
const CLICKABLE_ROLES: &[&str] = &["button", "link", "menuitem", "tab", "option", "switch"];

/// Binary clickability from tag, role, inline handler, and cursor style.
pub fn is_clickable(backend: &dyn DomBackend, node: NodeId) -> bool {
    match backend.tag_name(node).as_deref() {
        Some("button") | Some("a") | Some("select") => return true,
        Some("input") => {
            let input_type = backend
                .attribute(node, "type")
                .unwrap_or_else(|| "text".to_string());
            if CLICKABLE_INPUT_TYPES.contains(&input_type.as_str()) {
                return true;
            }
        }
        _ => {}
    }
    if let Some(role) = backend.attribute(node, "role") {
        if CLICKABLE_ROLES.contains(&role.as_str()) {
            return true;
        }
    }
    if backend.has_inline_click_handler(node) {
        return true;
    }
    backend.computed_style(node, "cursor").as_deref() == Some("pointer")
}
