//! Guidance steps: one target-resolution rule, a message, and an optional
//! synthetic action.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// The synthetic action a step may perform against its resolved target.
///
/// Internally tagged on `action` so the planner's JSON shape stays flat:
/// `{"action": "type", "value": "hello"}`. Making `value` part of the
/// `Type` variant means a type action without its value fails at parse
/// time instead of surfacing mid-guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum StepAction {
    Click,
    Type { value: String },
    Hover,
    Scroll,
    Focus,
}

impl StepAction {
    /// Whether the pointer glyph is rendered for this action.
    pub fn shows_pointer(&self) -> bool {
        matches!(self, Self::Click | Self::Hover | Self::Type { .. })
    }
}

/// One unit of guidance.
///
/// Target criteria are tried in priority order: `selector`, then `text`,
/// then `aria_label`. At least one must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub action: Option<StepAction>,
    #[serde(default)]
    pub auto_execute: bool,
}

impl Step {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            selector: None,
            text: None,
            aria_label: None,
            message: message.into(),
            description: None,
            action: None,
            auto_execute: false,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_action(mut self, action: StepAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn auto_execute(mut self) -> Self {
        self.auto_execute = true;
        self
    }

    /// Construction-time validation: a step needs a message and at least
    /// one target criterion.
    pub fn validate(&self) -> ProtocolResult<()> {
        if self.message.trim().is_empty() {
            return Err(ProtocolError::InvalidStep("empty message".to_string()));
        }
        if self.selector.is_none() && self.text.is_none() && self.aria_label.is_none() {
            return Err(ProtocolError::InvalidStep(format!(
                "no target criterion for step \"{}\"",
                self.message
            )));
        }
        Ok(())
    }
}
