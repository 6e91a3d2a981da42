//! # DarkVoir
//!
//! Element-targeting guidance: the relevance engine ranks interactive
//! page elements against a natural-language query, an external planner
//! turns the ranked candidates into a step list, and the guide engine
//! walks the user through those steps with highlight/message/pointer
//! overlays.
//!
//! This crate re-exports the member crates and wires them together; the
//! engines themselves live in `darkvoir-relevance` and `darkvoir-guide`,
//! both running against the `darkvoir-dom` capability boundary.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use darkvoir_dom as dom;
pub use darkvoir_guide as guide;
pub use darkvoir_protocols as protocols;
pub use darkvoir_relevance as relevance;

use darkvoir_guide::{GuideConfig, GuideEngine};
use darkvoir_protocols::{PlanningContext, ProtocolResult, StepPlanner};
use darkvoir_relevance::{DomAnalyzer, RelevanceConfig};

/// Top-level configuration: one section per engine.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub relevance: RelevanceConfig,
    pub guide: GuideConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Analyze the page for a query, ask the planner for steps, and start a
/// guide session over them. Returns the number of steps started.
pub async fn guide_through(
    analyzer: &DomAnalyzer,
    engine: &GuideEngine,
    planner: &dyn StepPlanner,
    query: &str,
) -> ProtocolResult<usize> {
    let candidates = analyzer.analyze_for_query(query);
    let page = analyzer.page_structure();
    let steps = planner
        .plan(query, &PlanningContext { page, candidates })
        .await?;
    let total = steps.len();
    engine.start(steps).await;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use darkvoir_dom::{VirtualDom, VirtualNodeSpec};
    use darkvoir_protocols::ScriptedPlanner;

    #[test]
    fn test_config_defaults_on_missing_file() {
        let config = AppConfig::load(Path::new("/nonexistent/darkvoir.toml")).unwrap();
        assert_eq!(config.relevance.max_candidates, 10);
        assert_eq!(config.guide.scroll_settle_ms, 300);
    }

    #[test]
    fn test_config_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[guide]\nscroll_settle_ms = 0\n\n[relevance]\nmax_candidates = 3"
        )
        .unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.guide.scroll_settle_ms, 0);
        assert_eq!(config.guide.auto_execute_delay_ms, 1_500);
        assert_eq!(config.relevance.max_candidates, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_guide_through_starts_session() {
        let dom = Arc::new(VirtualDom::new("https://example.com", "t"));
        dom.add_node(
            None,
            VirtualNodeSpec::new("button")
                .with_attr("id", "go")
                .with_text("Go")
                .with_rect(10.0, 10.0, 60.0, 30.0),
        );
        let analyzer = DomAnalyzer::new(dom.clone());
        let engine = GuideEngine::new(dom.clone());
        let planner =
            ScriptedPlanner::from_json_str(r##"[{"selector": "#go", "message": "Press go"}]"##)
                .unwrap();

        let total = guide_through(&analyzer, &engine, &planner, "press the go button")
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert!(engine.is_active());
        assert_eq!(engine.history().len(), 1);
    }
}
