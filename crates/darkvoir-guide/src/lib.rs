//! # DarkVoir Guide
//!
//! The step-by-step guidance state machine: resolves each step's target
//! with fallback, scrolls it into view, renders highlight/message/pointer
//! overlays, optionally executes a synthetic action, and advances on user
//! or timer input. One active session per document; every delayed
//! continuation is epoch-guarded so a stopped guide can never resurrect
//! its overlays.

mod actions;
mod config;
mod engine;
mod error;
mod overlay;
mod position;
mod resolve;
mod session;

pub use actions::execute_action;
pub use config::GuideConfig;
pub use engine::{GuideEngine, GuideKey};
pub use error::{GuideError, GuideResult};
pub use overlay::GuideControls;
pub use position::{best_position, bubble_rect, BubblePosition};
pub use resolve::find_step_element;
pub use session::{GuideSession, HistoryEntry};
