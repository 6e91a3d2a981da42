//! Page-level context handed to the planner alongside the candidates.

use serde::{Deserialize, Serialize};

/// Accessibility counters surfaced to the planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityCounts {
    /// Elements carrying an aria-label.
    pub aria_labeled: usize,
    /// Images without alt text.
    pub images_missing_alt: usize,
    /// Inputs with no associated label.
    pub inputs_missing_label: usize,
}

/// Aggregate page structure: counts and feature flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub url: String,
    pub title: String,
    pub domain: String,
    pub form_count: usize,
    pub link_count: usize,
    pub button_count: usize,
    pub input_count: usize,
    pub has_login: bool,
    pub has_search: bool,
    pub has_cart: bool,
    pub has_navigation: bool,
    pub accessibility: AccessibilityCounts,
}
