//! Query intent classification.

use darkvoir_protocols::Intent;

// Checked in this order; the first list with a phrase contained in the
// query wins.
const FIND_ELEMENT_PHRASES: &[&str] = &[
    "where is",
    "where's",
    "find",
    "locate",
    "show me",
    "look for",
    "which button",
    "can't see",
];

const DO_ACTION_PHRASES: &[&str] = &[
    "click", "press", "submit", "type", "enter", "fill", "select", "choose", "open", "close",
];

const FIX_ERROR_PHRASES: &[&str] = &[
    "error",
    "broken",
    "not working",
    "doesn't work",
    "fix",
    "issue",
    "problem",
    "failed",
    "stuck",
];

const EXPLAIN_PHRASES: &[&str] = &[
    "what is",
    "what does",
    "what's",
    "why",
    "how do",
    "how does",
    "explain",
    "mean",
];

/// Classify a query by substring matching against fixed phrase lists.
pub fn detect_intent(query: &str) -> Intent {
    let query = query.to_lowercase();
    let groups: [(&[&str], Intent); 4] = [
        (FIND_ELEMENT_PHRASES, Intent::FindElement),
        (DO_ACTION_PHRASES, Intent::DoAction),
        (FIX_ERROR_PHRASES, Intent::FixError),
        (EXPLAIN_PHRASES, Intent::Explain),
    ];
    for (phrases, intent) in groups {
        if phrases.iter().any(|p| query.contains(p)) {
            return intent;
        }
    }
    Intent::General
}
