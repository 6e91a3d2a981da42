//! # DarkVoir Protocols
//!
//! Wire types exchanged between the guidance engines and their external
//! collaborators: the step list produced by a planner, the candidate
//! elements and page context consumed by it, and the planner interface
//! itself. Pure data plus validation; no engine logic lives here.

mod candidate;
mod context;
mod error;
mod planner;
mod step;

pub use candidate::{CandidateElement, Intent};
pub use context::{AccessibilityCounts, PageContext};
pub use error::{ProtocolError, ProtocolResult};
pub use planner::{PlanningContext, ScriptedPlanner, StepPlanner};
pub use step::{Step, StepAction};
