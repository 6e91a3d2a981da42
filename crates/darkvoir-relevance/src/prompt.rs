//! Planner-facing rendering of analysis results.

use darkvoir_protocols::{CandidateElement, PageContext};

/// Render the page context and ranked candidates as the text block the
/// external planner consumes.
pub fn render_for_prompt(context: &PageContext, candidates: &[CandidateElement]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Page: {}\n", context.title));
    out.push_str(&format!("URL: {}\n", context.url));
    out.push_str(&format!(
        "Structure: {} forms, {} links, {} buttons, {} inputs\n",
        context.form_count, context.link_count, context.button_count, context.input_count
    ));

    let mut features = Vec::new();
    if context.has_login {
        features.push("login");
    }
    if context.has_search {
        features.push("search");
    }
    if context.has_cart {
        features.push("cart");
    }
    if context.has_navigation {
        features.push("navigation");
    }
    if !features.is_empty() {
        out.push_str(&format!("Features: {}\n", features.join(", ")));
    }

    out.push_str("\nRelevant elements:\n");
    for (index, candidate) in candidates.iter().enumerate() {
        out.push_str(&render_candidate(index, candidate));
        out.push('\n');
    }
    out
}

fn render_candidate(index: usize, candidate: &CandidateElement) -> String {
    let mut parts = vec![format!("[{index}]"), format!("<{}>", candidate.tag)];

    if !candidate.text.is_empty() {
        let text = if candidate.text.len() > 50 {
            format!("{}...", candidate.text.chars().take(47).collect::<String>())
        } else {
            candidate.text.clone()
        };
        parts.push(format!("\"{}\"", text.replace('\n', " ")));
    }
    if let Some(ref id) = candidate.id {
        parts.push(format!("id={id}"));
    }
    if let Some(ref label) = candidate.aria_label {
        parts.push(format!("aria-label=\"{label}\""));
    }
    parts.push(format!("selector={}", candidate.selector));
    if candidate.disabled {
        parts.push("disabled".to_string());
    }
    parts.join(" ")
}
