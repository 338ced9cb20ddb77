//! Editor glue around the lifecycle core: operator registration and
//! dispatch, the panel layout drawn on each redraw, and a scene inspector.
//!
//! # Invariants
//! - Drawing and inspecting never mutate the scene.
//! - Lifecycle failures reach the caller of `invoke` unchanged.

pub mod addon;
pub mod inspector;
pub mod operators;
pub mod panel;

pub use addon::AddonInfo;
pub use inspector::{SceneInspector, SceneSummary};
pub use operators::{DispatchError, OperatorDescriptor, OperatorOutcome, OperatorRegistry};
pub use panel::{NewtonPanel, PanelItem, PanelLayout, PropertyValue};
