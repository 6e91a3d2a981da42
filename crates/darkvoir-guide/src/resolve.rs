//! Step target resolution with fallback.

use tracing::debug;

use darkvoir_dom::{DomBackend, NodeId};
use darkvoir_protocols::Step;
use darkvoir_relevance::is_element_visible;

// Tag set searched when falling back to text matching.
const TEXT_SEARCH_POOLS: [&str; 5] = ["button", "a", "input", r#"[role="button"]"#, "label"];

fn is_usable(backend: &dyn DomBackend, node: NodeId) -> bool {
    !backend.bounding_box(node).is_empty() && is_element_visible(backend, node)
}

/// Resolve a step's target element. Criteria are tried in priority
/// order (selector, then text, then aria-label) and the first visible
/// hit wins. Selector errors count as "no match" and fall through to
/// the next criterion.
pub fn find_step_element(backend: &dyn DomBackend, step: &Step) -> Option<NodeId> {
    if let Some(ref selector) = step.selector {
        match backend.query_all(selector) {
            Ok(nodes) => {
                if let Some(node) = nodes.into_iter().find(|n| is_usable(backend, *n)) {
                    return Some(node);
                }
            }
            Err(e) => debug!(selector, error = %e, "selector lookup failed"),
        }
    }

    if let Some(ref text) = step.text {
        let needle = text.to_lowercase();
        for pool in TEXT_SEARCH_POOLS {
            let Ok(nodes) = backend.query_all(pool) else {
                continue;
            };
            for node in nodes {
                if backend.text_content(node).to_lowercase().contains(&needle)
                    && is_usable(backend, node)
                {
                    return Some(node);
                }
            }
        }
    }

    if let Some(ref label) = step.aria_label {
        let Ok(nodes) = backend.query_all("[aria-label]") else {
            return None;
        };
        for node in nodes {
            if backend.attribute(node, "aria-label").as_deref() == Some(label.as_str())
                && is_usable(backend, node)
            {
                return Some(node);
            }
        }
    }

    None
}
