//! Host scene model: the object/collection store and the property slot a
//! physics world is attached to.
//!
//! # Invariants
//! - Collections keep insertion order; that order is the lookup order.
//! - A scene holds at most one world binding.
//! - All mutations flow through explicit operations and are logged.

pub mod host;
pub mod scene;

pub use host::{ObjectStore, WorldProperty};
pub use scene::{Collection, Scene, SceneEvent, SceneObject, WorldBinding};
