//! The DOM analyzer: query-driven element ranking and page-structure
//! aggregation.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, warn};

use darkvoir_dom::{DomBackend, NodeId};
use darkvoir_protocols::{AccessibilityCounts, CandidateElement, Intent, PageContext};

use crate::config::RelevanceConfig;
use crate::intent::detect_intent;
use crate::keywords::extract_keywords;
use crate::matcher::{element_matches_keyword, is_clickable, is_element_interactive};
use crate::metadata::element_metadata;

// Scanned in this order; earlier pools surface first among ties.
const POOL_SELECTORS: [&str; 5] = [
    r#"button, input[type="submit"], [role="button"]"#,
    "a",
    "input, textarea, select",
    "label",
    "[aria-label], [aria-describedby]",
];

struct CachedStructure {
    at: Instant,
    context: PageContext,
}

/// Scans the page for elements relevant to a user query.
///
/// One analyzer per document. Candidates are built fresh on every call;
/// only the page-structure aggregate is cached, briefly.
pub struct DomAnalyzer {
    backend: Arc<dyn DomBackend>,
    config: RelevanceConfig,
    structure_cache: Mutex<Option<CachedStructure>>,
}

impl DomAnalyzer {
    pub fn new(backend: Arc<dyn DomBackend>) -> Self {
        Self::with_config(backend, RelevanceConfig::default())
    }

    pub fn with_config(backend: Arc<dyn DomBackend>, config: RelevanceConfig) -> Self {
        Self {
            backend,
            config,
            structure_cache: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &Arc<dyn DomBackend> {
        &self.backend
    }

    /// Rank candidate elements for a query, best first, capped.
    ///
    /// Fails soft: a blank query or a query with no usable keywords
    /// returns an empty list.
    pub fn analyze_for_query(&self, query: &str) -> Vec<CandidateElement> {
        let query = query.trim();
        if query.is_empty() {
            warn!("ignoring empty query");
            return Vec::new();
        }

        let intent = detect_intent(query);
        let keywords = extract_keywords(query, self.config.max_keywords);
        debug!(?intent, ?keywords, "analyzing query");
        if keywords.is_empty() {
            return Vec::new();
        }

        let nodes = self.find_relevant_elements(&keywords, intent);
        nodes
            .into_iter()
            .filter_map(|node| {
                element_metadata(self.backend.as_ref(), node, self.config.text_limit)
                    .map_err(|e| debug!(error = %e, "dropping candidate"))
                    .ok()
            })
            .take(self.config.max_candidates)
            .collect()
    }

    /// Scan the fixed pools for nodes matching any keyword, deduplicated
    /// by node identity, interactive elements only, clickable first.
    fn find_relevant_elements(&self, keywords: &[String], intent: Intent) -> Vec<NodeId> {
        let backend = self.backend.as_ref();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut found: Vec<NodeId> = Vec::new();

        for keyword in keywords.iter().take(self.config.max_keywords) {
            for pool in POOL_SELECTORS {
                // A failing pool query counts as "no matches in this pool".
                let nodes = match backend.query_all(pool) {
                    Ok(nodes) => nodes,
                    Err(e) => {
                        debug!(pool, error = %e, "pool query failed");
                        continue;
                    }
                };
                for node in nodes {
                    if seen.contains(&node) {
                        continue;
                    }
                    if element_matches_keyword(backend, node, keyword)
                        && is_element_interactive(backend, node, self.config.viewport_margin)
                    {
                        seen.insert(node);
                        found.push(node);
                    }
                }
            }
        }

        // Stable: ties keep scan order.
        found.sort_by_key(|node| !is_clickable(backend, *node));
        debug!(?intent, matches = found.len(), "element scan complete");
        found
    }

    /// Aggregate page structure, cached for the configured TTL.
    pub fn page_structure(&self) -> PageContext {
        let ttl = std::time::Duration::from_millis(self.config.structure_cache_ttl_ms);
        {
            let cache = self.structure_cache.lock();
            if let Some(cached) = cache.as_ref() {
                if cached.at.elapsed() <= ttl {
                    return cached.context.clone();
                }
            }
        }
        let context = self.compute_structure();
        *self.structure_cache.lock() = Some(CachedStructure {
            at: Instant::now(),
            context: context.clone(),
        });
        context
    }

    fn compute_structure(&self) -> PageContext {
        let backend = self.backend.as_ref();
        let count = |selector: &str| backend.query_all(selector).map(|v| v.len()).unwrap_or(0);
        let all = |selector: &str| backend.query_all(selector).unwrap_or_default();

        let url = backend.url();
        let domain = domain_of(&url);

        let buttons = all(r#"button, input[type="submit"], input[type="button"], [role="button"]"#);
        let links = all("a");
        let inputs = all("input, textarea, select");

        let has_login = count(r#"input[type="password"]"#) > 0
            || buttons
                .iter()
                .chain(links.iter())
                .any(|n| text_has_any(backend, *n, &["log in", "login", "sign in"]));
        let has_search = count(r#"input[type="search"]"#) > 0
            || count(r#"[role="search"]"#) > 0
            || inputs.iter().any(|n| {
                backend
                    .attribute(*n, "placeholder")
                    .is_some_and(|p| p.to_lowercase().contains("search"))
            });
        let has_cart = buttons.iter().chain(links.iter()).any(|n| {
            text_has_any(backend, *n, &["cart", "basket"])
                || backend
                    .attribute(*n, "id")
                    .is_some_and(|id| id.to_lowercase().contains("cart"))
                || backend.classes(*n).iter().any(|c| c.to_lowercase().contains("cart"))
        });
        let has_navigation = count("nav") > 0 || count(r#"[role="navigation"]"#) > 0;

        let label_targets: HashSet<String> = all("label")
            .iter()
            .filter_map(|n| backend.attribute(*n, "for"))
            .collect();
        let inputs_missing_label = inputs
            .iter()
            .filter(|n| {
                backend.attribute(**n, "aria-label").is_none()
                    && !backend
                        .attribute(**n, "id")
                        .is_some_and(|id| label_targets.contains(&id))
            })
            .count();
        let images_missing_alt = all("img")
            .iter()
            .filter(|n| backend.attribute(**n, "alt").is_none())
            .count();

        PageContext {
            title: backend.title(),
            domain,
            form_count: count("form"),
            link_count: links.len(),
            button_count: buttons.len(),
            input_count: inputs.len(),
            has_login,
            has_search,
            has_cart,
            has_navigation,
            accessibility: AccessibilityCounts {
                aria_labeled: count("[aria-label]"),
                images_missing_alt,
                inputs_missing_label,
            },
            url,
        }
    }
}

fn text_has_any(backend: &dyn DomBackend, node: NodeId, needles: &[&str]) -> bool {
    let text = backend.text_content(node).to_lowercase();
    needles.iter().any(|n| text.contains(n))
}

fn domain_of(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
