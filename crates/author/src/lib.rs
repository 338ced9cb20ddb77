//! World lifecycle: when a physics world may be created for a scene, where
//! it is anchored, how it is torn down, and which actions the UI offers.
//!
//! # Invariants
//! - Lifecycle state is derived from the scene on every query, never stored.
//! - A world is only created while a home object exists.
//! - At most one world is bound per scene.
//! - Destroying a world clears the reference and leaves the home in place.
//! - A failed transition mutates nothing.

pub mod home;
pub mod lifecycle;
pub mod visibility;

pub use home::HomeLocator;
pub use lifecycle::{LifecycleError, LifecycleState, LifecycleStatus, WorldLifecycle};
pub use visibility::{ActionKind, visible_actions};
