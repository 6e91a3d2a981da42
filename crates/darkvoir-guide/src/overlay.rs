//! Overlay rendering: scrim, highlight, message bubble, pointer glyph,
//! step indicator, and the control bar.

use tracing::debug;

use darkvoir_dom::{
    BoundingBox, DomBackend, NodeId, OverlayKind, OverlaySpec, RESERVED_CLASSES,
};
use darkvoir_protocols::Step;

use crate::config::GuideConfig;
use crate::position::{best_position, bubble_rect};

const POINTER_SIZE: f64 = 24.0;

/// Handles to the control-bar buttons, for the host layer to bind click
/// events against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideControls {
    pub previous: NodeId,
    pub next: NodeId,
    pub exit: NodeId,
}

/// Tracks the overlay nodes of the active session. Exactly one node of
/// each kind exists while active; `clear_all` sweeps by reserved class so
/// even handles lost to a page mutation are removed.
#[derive(Debug, Default)]
pub(crate) struct OverlayManager {
    scrim: Option<NodeId>,
    indicator: Option<NodeId>,
    controls_bar: Option<NodeId>,
    prev_button: Option<NodeId>,
    next_button: Option<NodeId>,
    exit_button: Option<NodeId>,
    highlight: Option<NodeId>,
    message: Option<NodeId>,
    pointer: Option<NodeId>,
}

impl OverlayManager {
    /// Build the session-scoped chrome: scrim, indicator, and controls.
    pub fn build_scaffold(&mut self, backend: &dyn DomBackend, total: usize) {
        let viewport = backend.viewport();

        self.scrim = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Scrim)
                .with_rect(BoundingBox::new(0.0, 0.0, viewport.width, viewport.height)),
        ));
        self.indicator = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::StepIndicator)
                .with_text(format!("Step 1 of {total}"))
                .with_rect(BoundingBox::new(viewport.width / 2.0 - 60.0, 16.0, 120.0, 32.0)),
        ));

        let bar_y = viewport.height - 64.0;
        self.controls_bar = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Controls)
                .with_rect(BoundingBox::new(viewport.width / 2.0 - 140.0, bar_y, 280.0, 48.0)),
        ));
        self.prev_button = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Controls)
                .with_class("dark-voir-prev")
                .with_text("Previous")
                .with_rect(BoundingBox::new(viewport.width / 2.0 - 132.0, bar_y + 8.0, 80.0, 32.0)),
        ));
        self.next_button = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Controls)
                .with_class("dark-voir-next")
                .with_text("Next")
                .with_rect(BoundingBox::new(viewport.width / 2.0 - 40.0, bar_y + 8.0, 80.0, 32.0)),
        ));
        self.exit_button = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Controls)
                .with_class("dark-voir-exit")
                .with_text("Exit")
                .with_rect(BoundingBox::new(viewport.width / 2.0 + 52.0, bar_y + 8.0, 80.0, 32.0)),
        ));
        debug!(total, "overlay scaffold built");
    }

    /// Button handles for host-side event wiring, once the scaffold is up.
    pub fn controls(&self) -> Option<GuideControls> {
        Some(GuideControls {
            previous: self.prev_button?,
            next: self.next_button?,
            exit: self.exit_button?,
        })
    }

    /// Refresh the indicator and control states for the current step.
    pub fn update_chrome(&self, backend: &dyn DomBackend, index: usize, total: usize) {
        if let Some(indicator) = self.indicator {
            backend.set_overlay_text(indicator, &format!("Step {} of {total}", index + 1));
        }
        if let Some(prev) = self.prev_button {
            let disabled = if index == 0 { "true" } else { "false" };
            backend.set_attribute(prev, "aria-disabled", disabled);
        }
        if let Some(next) = self.next_button {
            let label = if index + 1 == total { "Complete" } else { "Next" };
            backend.set_overlay_text(next, label);
        }
    }

    /// Remove the per-step nodes (highlight, message, pointer). Called
    /// before every render so each step recreates them from scratch.
    pub fn clear_step_nodes(&mut self, backend: &dyn DomBackend) {
        for node in [self.highlight.take(), self.message.take(), self.pointer.take()]
            .into_iter()
            .flatten()
        {
            backend.remove_node(node);
        }
    }

    /// Render the highlight, message bubble, and (for pointer-worthy
    /// actions) the pointer glyph for a resolved target.
    pub fn render_step(
        &mut self,
        backend: &dyn DomBackend,
        target_rect: BoundingBox,
        step: &Step,
        config: &GuideConfig,
    ) {
        self.clear_step_nodes(backend);

        self.highlight = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Highlight)
                .with_class("dark-voir-pulse")
                .with_rect(target_rect.inflate(config.highlight_padding)),
        ));

        let position = best_position(&target_rect, &backend.viewport());
        let rect = bubble_rect(
            &target_rect,
            position,
            config.bubble_width,
            config.bubble_height,
            config.bubble_offset,
        );
        let mut text = step.message.clone();
        if let Some(ref description) = step.description {
            text.push('\n');
            text.push_str(description);
        }
        self.message = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Message)
                .with_class(position.css_class())
                .with_text(text)
                .with_rect(rect),
        ));

        if step.action.as_ref().is_some_and(|a| a.shows_pointer()) {
            let (cx, _) = target_rect.center();
            self.pointer = Some(backend.insert_overlay(
                OverlaySpec::new(OverlayKind::Pointer).with_rect(BoundingBox::new(
                    cx - POINTER_SIZE / 2.0,
                    target_rect.y - POINTER_SIZE - 4.0,
                    POINTER_SIZE,
                    POINTER_SIZE,
                )),
            ));
        }
    }

    /// Show the transient "element not found" notice.
    pub fn render_error(&mut self, backend: &dyn DomBackend, text: &str, config: &GuideConfig) {
        self.clear_step_nodes(backend);
        let viewport = backend.viewport();
        self.message = Some(backend.insert_overlay(
            OverlaySpec::new(OverlayKind::Message)
                .with_class("dark-voir-message-error")
                .with_text(text)
                .with_rect(BoundingBox::new(
                    viewport.width / 2.0 - config.bubble_width / 2.0,
                    viewport.height / 2.0 - config.bubble_height / 2.0,
                    config.bubble_width,
                    config.bubble_height,
                )),
        ));
    }

    /// Swap the message bubble for its success variant.
    pub fn show_completion(&mut self, backend: &dyn DomBackend, config: &GuideConfig) {
        match self.message {
            Some(message) => {
                backend.set_overlay_text(message, "Guide complete!");
                backend.add_class(message, "dark-voir-message-success");
            }
            None => {
                let viewport = backend.viewport();
                self.message = Some(backend.insert_overlay(
                    OverlaySpec::new(OverlayKind::Message)
                        .with_class("dark-voir-message-success")
                        .with_text("Guide complete!")
                        .with_rect(BoundingBox::new(
                            viewport.width / 2.0 - config.bubble_width / 2.0,
                            viewport.height / 2.0 - config.bubble_height / 2.0,
                            config.bubble_width,
                            config.bubble_height,
                        )),
                ));
            }
        }
    }

    /// Remove every overlay node. Tracked handles go first, then a sweep
    /// by reserved class catches anything whose handle was lost.
    pub fn clear_all(&mut self, backend: &dyn DomBackend) {
        let tracked = [
            self.scrim,
            self.indicator,
            self.controls_bar,
            self.prev_button,
            self.next_button,
            self.exit_button,
            self.highlight,
            self.message,
            self.pointer,
        ];
        for node in tracked.into_iter().flatten() {
            backend.remove_node(node);
        }
        for class in RESERVED_CLASSES {
            for node in backend.nodes_with_class(class) {
                backend.remove_node(node);
            }
        }
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkvoir_dom::{VirtualDom, VirtualNodeSpec};
    use darkvoir_protocols::StepAction;

    fn overlay_count(dom: &VirtualDom) -> usize {
        RESERVED_CLASSES
            .iter()
            .map(|c| dom.nodes_with_class(c).len())
            .sum()
    }

    #[test]
    fn test_scaffold_and_sweep() {
        let dom = VirtualDom::new("https://example.com", "t");
        let mut overlays = OverlayManager::default();
        overlays.build_scaffold(&dom, 3);
        assert_eq!(dom.nodes_with_class("dark-voir-overlay").len(), 1);
        assert_eq!(dom.nodes_with_class("dark-voir-step-indicator").len(), 1);
        assert_eq!(dom.nodes_with_class("dark-voir-controls").len(), 4);

        overlays.clear_all(&dom);
        assert_eq!(overlay_count(&dom), 0);
    }

    #[test]
    fn test_render_step_recreates_nodes() {
        let dom = VirtualDom::new("https://example.com", "t");
        let mut overlays = OverlayManager::default();
        let config = GuideConfig::default();
        let step = Step::new("Click here").with_selector("#x").with_action(StepAction::Click);
        let rect = BoundingBox::new(100.0, 300.0, 100.0, 40.0);

        overlays.render_step(&dom, rect, &step, &config);
        assert_eq!(dom.nodes_with_class("dark-voir-highlight").len(), 1);
        assert_eq!(dom.nodes_with_class("dark-voir-message").len(), 1);
        assert_eq!(dom.nodes_with_class("dark-voir-pointer").len(), 1);

        // Re-render keeps exactly one of each.
        overlays.render_step(&dom, rect, &step, &config);
        assert_eq!(dom.nodes_with_class("dark-voir-highlight").len(), 1);
        assert_eq!(dom.nodes_with_class("dark-voir-message").len(), 1);
    }

    #[test]
    fn test_pointer_only_for_pointer_actions() {
        let dom = VirtualDom::new("https://example.com", "t");
        let mut overlays = OverlayManager::default();
        let config = GuideConfig::default();
        let rect = BoundingBox::new(100.0, 300.0, 100.0, 40.0);

        overlays.render_step(&dom, rect, &Step::new("Look").with_selector("#x"), &config);
        assert!(dom.nodes_with_class("dark-voir-pointer").is_empty());

        overlays.render_step(
            &dom,
            rect,
            &Step::new("Scroll")
                .with_selector("#x")
                .with_action(StepAction::Scroll),
            &config,
        );
        assert!(dom.nodes_with_class("dark-voir-pointer").is_empty());
    }

    #[test]
    fn test_highlight_padding() {
        let dom = VirtualDom::new("https://example.com", "t");
        let mut overlays = OverlayManager::default();
        let config = GuideConfig::default();
        let rect = BoundingBox::new(100.0, 300.0, 100.0, 40.0);
        overlays.render_step(&dom, rect, &Step::new("m").with_selector("#x"), &config);
        let highlight = dom.nodes_with_class("dark-voir-highlight")[0];
        let shown = dom.bounding_box(highlight);
        assert_eq!(shown, rect.inflate(5.0));
    }

    #[test]
    fn test_chrome_updates() {
        let dom = VirtualDom::new("https://example.com", "t");
        let mut overlays = OverlayManager::default();
        overlays.build_scaffold(&dom, 2);

        overlays.update_chrome(&dom, 0, 2);
        let indicator = dom.nodes_with_class("dark-voir-step-indicator")[0];
        assert_eq!(dom.text_content(indicator), "Step 1 of 2");
        let prev = dom.nodes_with_class("dark-voir-prev")[0];
        assert_eq!(dom.attribute(prev, "aria-disabled").as_deref(), Some("true"));
        let next = dom.nodes_with_class("dark-voir-next")[0];
        assert_eq!(dom.text_content(next), "Next");

        overlays.update_chrome(&dom, 1, 2);
        assert_eq!(dom.text_content(indicator), "Step 2 of 2");
        assert_eq!(dom.attribute(prev, "aria-disabled").as_deref(), Some("false"));
        assert_eq!(dom.text_content(next), "Complete");
    }

    #[test]
    fn test_completion_reuses_message() {
        let dom = VirtualDom::new("https://example.com", "t");
        let mut overlays = OverlayManager::default();
        let config = GuideConfig::default();
        overlays.render_step(
            &dom,
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            &Step::new("last").with_selector("#x"),
            &config,
        );
        overlays.show_completion(&dom, &config);
        let messages = dom.nodes_with_class("dark-voir-message");
        assert_eq!(messages.len(), 1);
        assert_eq!(dom.text_content(messages[0]), "Guide complete!");
        assert_eq!(
            dom.nodes_with_class("dark-voir-message-success"),
            messages
        );
    }
}
