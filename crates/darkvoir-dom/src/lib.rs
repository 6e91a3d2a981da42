//! # DarkVoir DOM
//!
//! The narrow document/layout capability boundary the guidance engines run
//! against. Everything the engines need from a page goes through the
//! [`DomBackend`] trait, so they can be exercised against [`VirtualDom`]
//! (an in-memory page used by tests and the demo binary) as well as a real
//! browser bridge.

mod backend;
mod error;
mod geometry;
mod selector;
mod virtual_dom;

pub use backend::{DomBackend, NodeId, OverlayKind, OverlaySpec, SyntheticEvent, RESERVED_CLASSES};
pub use error::{DomError, DomResult};
pub use geometry::{BoundingBox, ViewportInfo};
pub use selector::SelectorList;
pub use virtual_dom::{PageFixture, VirtualDom, VirtualNodeSpec};
