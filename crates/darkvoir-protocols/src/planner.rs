//! The step-planner collaborator interface.
//!
//! The real planner is a language-model call living outside this
//! repository; the engines only see this trait. `ScriptedPlanner` replays
//! a pre-authored step list and backs the demo binary and tests.

use async_trait::async_trait;
use tracing::debug;

use crate::candidate::CandidateElement;
use crate::context::PageContext;
use crate::error::{ProtocolError, ProtocolResult};
use crate::step::Step;

/// Everything a planner gets to work with for one query.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    pub page: PageContext,
    pub candidates: Vec<CandidateElement>,
}

/// Turns a user query plus page context into an ordered step list.
#[async_trait]
pub trait StepPlanner: Send + Sync {
    async fn plan(&self, query: &str, context: &PlanningContext) -> ProtocolResult<Vec<Step>>;
}

/// Planner that replays a fixed script, ignoring the query.
pub struct ScriptedPlanner {
    steps: Vec<Step>,
}

impl ScriptedPlanner {
    /// Build from already-validated steps.
    pub fn new(steps: Vec<Step>) -> ProtocolResult<Self> {
        for step in &steps {
            step.validate()?;
        }
        Ok(Self { steps })
    }

    /// Build from the planner's JSON wire shape (an array of steps).
    pub fn from_json_str(json: &str) -> ProtocolResult<Self> {
        let steps: Vec<Step> = serde_json::from_str(json)?;
        Self::new(steps)
    }
}

#[async_trait]
impl StepPlanner for ScriptedPlanner {
    async fn plan(&self, query: &str, context: &PlanningContext) -> ProtocolResult<Vec<Step>> {
        debug!(
            query,
            candidates = context.candidates.len(),
            steps = self.steps.len(),
            "scripted planner replaying"
        );
        if self.steps.is_empty() {
            return Err(ProtocolError::Planner("script is empty".to_string()));
        }
        Ok(self.steps.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AccessibilityCounts;

    fn context() -> PlanningContext {
        PlanningContext {
            page: PageContext {
                url: "https://example.com".to_string(),
                title: "Example".to_string(),
                domain: "example.com".to_string(),
                form_count: 0,
                link_count: 0,
                button_count: 1,
                input_count: 0,
                has_login: false,
                has_search: false,
                has_cart: false,
                has_navigation: false,
                accessibility: AccessibilityCounts::default(),
            },
            candidates: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_scripted_planner_replays() {
        let planner = ScriptedPlanner::from_json_str(
            r##"[{"selector": "#ok", "message": "Click OK"}]"##,
        )
        .unwrap();
        let steps = planner.plan("anything", &context()).await.unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].message, "Click OK");
    }

    #[test]
    fn test_scripted_planner_rejects_invalid_script() {
        // Step without any target criterion.
        assert!(ScriptedPlanner::from_json_str(r#"[{"message": "no target"}]"#).is_err());
    }
}
