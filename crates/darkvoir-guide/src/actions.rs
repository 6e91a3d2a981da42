//! Synthetic action execution against a resolved target.

use tracing::debug;

use darkvoir_dom::{DomBackend, NodeId, SyntheticEvent};
use darkvoir_protocols::StepAction;

use crate::error::GuideResult;

/// Perform a step's action. Failures bubble up as `ActionExecution` and
/// are logged by the engine; the step still counts as shown.
pub fn execute_action(
    backend: &dyn DomBackend,
    node: NodeId,
    action: &StepAction,
) -> GuideResult<()> {
    match action {
        StepAction::Click => {
            backend.click(node)?;
        }
        StepAction::Type { value } => {
            backend.focus(node);
            backend.set_value(node, value);
            backend.dispatch(node, SyntheticEvent::Input)?;
            backend.dispatch(node, SyntheticEvent::Change)?;
        }
        StepAction::Hover => {
            backend.dispatch(node, SyntheticEvent::MouseEnter)?;
            backend.dispatch(node, SyntheticEvent::MouseOver)?;
        }
        StepAction::Scroll => {
            backend.scroll_into_view(node);
        }
        StepAction::Focus => {
            backend.focus(node);
        }
    }
    debug!(node = node.as_raw(), ?action, "action executed");
    Ok(())
}
