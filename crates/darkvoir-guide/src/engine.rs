//! The guide state machine.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use darkvoir_dom::DomBackend;
use darkvoir_protocols::Step;

use crate::actions::execute_action;
use crate::config::GuideConfig;
use crate::overlay::{GuideControls, OverlayManager};
use crate::resolve::find_step_element;
use crate::session::{GuideSession, HistoryEntry};

const NOT_FOUND_MESSAGE: &str = "Could not find this element, skipping ahead";

/// Keys the engine reacts to while a guide is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

enum Presentation {
    /// The step is on screen.
    Presented,
    /// Target not found; advance to the next step.
    Skip,
    /// The session was stopped, restarted, or moved to another step while
    /// this continuation was waiting. Do nothing.
    Stale,
}

struct EngineState {
    session: GuideSession,
    overlays: OverlayManager,
}

/// Single-session guide engine. One instance per document; exactly one
/// session may be active at a time, and `start` on an active engine
/// performs a hard reset first.
///
/// The `epoch` counter increments on every `start`/`stop`. Continuations
/// resumed after a timed wait re-check the epoch, the active flag, and
/// their step index before touching the DOM, so stale timers can never
/// resurrect overlays.
pub struct GuideEngine {
    backend: Arc<dyn DomBackend>,
    config: GuideConfig,
    epoch: AtomicU64,
    active: AtomicBool,
    state: Mutex<EngineState>,
}

impl GuideEngine {
    pub fn new(backend: Arc<dyn DomBackend>) -> Self {
        Self::with_config(backend, GuideConfig::default())
    }

    pub fn with_config(backend: Arc<dyn DomBackend>, config: GuideConfig) -> Self {
        Self {
            backend,
            config,
            epoch: AtomicU64::new(0),
            active: AtomicBool::new(false),
            state: Mutex::new(EngineState {
                session: GuideSession::default(),
                overlays: OverlayManager::default(),
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn current_index(&self) -> usize {
        self.state.lock().session.current_index
    }

    pub fn step_count(&self) -> usize {
        self.state.lock().session.len()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().session.history.clone()
    }

    /// Control-bar button handles for host-side click wiring, while a
    /// session is active.
    pub fn controls(&self) -> Option<GuideControls> {
        self.state.lock().overlays.controls()
    }

    /// Begin a new session. An active session is stopped first (hard
    /// reset, no step continuity); an empty step list is a warned no-op.
    pub async fn start(&self, steps: Vec<Step>) {
        if self.is_active() {
            self.stop();
        }
        if steps.is_empty() {
            warn!("ignoring guide start with no steps");
            return;
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);
        let total = steps.len();
        {
            let mut state = self.state.lock();
            state.session = GuideSession::new(steps);
            state.overlays.clear_all(self.backend.as_ref());
            state.overlays.build_scaffold(self.backend.as_ref(), total);
        }
        self.active.store(true, Ordering::SeqCst);
        info!(total, "guide started");
        self.run_from(0).await;
    }

    /// Jump to a specific step. Out-of-range indices are a warned no-op
    /// with no state change.
    pub async fn show_step(&self, index: usize) {
        if !self.is_active() {
            warn!(index, "show_step on inactive guide");
            return;
        }
        let total = self.step_count();
        if index >= total {
            warn!(index, total, "step index out of range");
            return;
        }
        self.run_from(index).await;
    }

    pub async fn next_step(&self) {
        if !self.is_active() {
            return;
        }
        let (index, total) = {
            let state = self.state.lock();
            (state.session.current_index, state.session.len())
        };
        if index + 1 < total {
            self.run_from(index + 1).await;
        } else {
            self.complete().await;
        }
    }

    pub async fn previous_step(&self) {
        if !self.is_active() {
            return;
        }
        let index = self.current_index();
        if index > 0 {
            self.run_from(index - 1).await;
        }
    }

    /// Show the success variant of the message, then stop after the
    /// configured delay.
    pub async fn complete(&self) {
        if !self.is_active() {
            return;
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.state
            .lock()
            .overlays
            .show_completion(self.backend.as_ref(), &self.config);
        info!("guide complete");

        sleep(Duration::from_millis(self.config.complete_stop_delay_ms)).await;
        if self.is_active() && self.epoch.load(Ordering::SeqCst) == epoch {
            self.stop();
        }
    }

    /// Tear the session down: every overlay node is removed, the step
    /// list and history are cleared, pending continuations are
    /// invalidated. Safe to call from any state, including Idle.
    pub fn stop(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let was_active = self.active.swap(false, Ordering::SeqCst);
        let mut state = self.state.lock();
        state.overlays.clear_all(self.backend.as_ref());
        state.session = GuideSession::default();
        if was_active {
            info!("guide stopped");
        }
    }

    /// Keyboard routing; ignored while Idle.
    pub async fn handle_key(&self, key: GuideKey) {
        if !self.is_active() {
            return;
        }
        match key {
            GuideKey::ArrowRight => self.next_step().await,
            GuideKey::ArrowLeft => self.previous_step().await,
            GuideKey::Escape => self.stop(),
        }
    }

    /// Present `index`, walking forward past unresolvable steps.
    async fn run_from(&self, mut index: usize) {
        loop {
            match self.present_step(index).await {
                Presentation::Presented | Presentation::Stale => return,
                Presentation::Skip => {
                    if index + 1 < self.step_count() {
                        index += 1;
                    } else {
                        self.complete().await;
                        return;
                    }
                }
            }
        }
    }

    async fn present_step(&self, index: usize) -> Presentation {
        let backend = self.backend.as_ref();
        let epoch = self.epoch.load(Ordering::SeqCst);

        let step = {
            let mut state = self.state.lock();
            let Some(step) = state.session.steps.get(index).cloned() else {
                return Presentation::Stale;
            };
            state.session.current_index = index;
            let total = state.session.len();
            state.overlays.update_chrome(backend, index, total);
            step
        };

        let Some(node) = find_step_element(backend, &step) else {
            warn!(index, "step target not found, skipping forward");
            self.state
                .lock()
                .overlays
                .render_error(backend, NOT_FOUND_MESSAGE, &self.config);
            sleep(Duration::from_millis(self.config.skip_on_failure_delay_ms)).await;
            if !self.still_current(epoch, index) {
                return Presentation::Stale;
            }
            return Presentation::Skip;
        };

        backend.scroll_into_view(node);
        sleep(Duration::from_millis(self.config.scroll_settle_ms)).await;
        if !self.still_current(epoch, index) {
            return Presentation::Stale;
        }

        let rect = backend.bounding_box(node);
        {
            let mut state = self.state.lock();
            state.overlays.render_step(backend, rect, &step, &self.config);
            state.session.record(index);
        }
        debug!(index, "step presented");

        if step.auto_execute {
            if let Some(ref action) = step.action {
                sleep(Duration::from_millis(self.config.auto_execute_delay_ms)).await;
                if !self.still_current(epoch, index) {
                    return Presentation::Stale;
                }
                if let Err(e) = execute_action(backend, node, action) {
                    error!(index, error = %e, "auto-executed action failed");
                }
            }
        }
        Presentation::Presented
    }

    /// Whether a continuation scheduled for (epoch, index) may still act.
    fn still_current(&self, epoch: u64, index: usize) -> bool {
        self.is_active()
            && self.epoch.load(Ordering::SeqCst) == epoch
            && self.state.lock().session.current_index == index
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
