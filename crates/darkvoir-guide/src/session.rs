//! Guide session state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use darkvoir_protocols::Step;

/// One entry in the append-only session history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub step_index: usize,
    pub timestamp: DateTime<Utc>,
    pub step: Step,
}

/// One run of the step-by-step state machine, from `start()` to `stop()`.
#[derive(Debug, Default)]
pub struct GuideSession {
    pub steps: Vec<Step>,
    pub current_index: usize,
    pub history: Vec<HistoryEntry>,
}

impl GuideSession {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            current_index: 0,
            history: Vec::new(),
        }
    }

    pub fn record(&mut self, step_index: usize) {
        if let Some(step) = self.steps.get(step_index) {
            self.history.push(HistoryEntry {
                step_index,
                timestamp: Utc::now(),
                step: step.clone(),
            });
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
