//! Physics engine boundary: the create/destroy contract the add-on drives,
//! plus an in-process engine for tests and the CLI.
//!
//! # Invariants
//! - A `WorldHandle` has exactly one owner and is never cloned.
//! - Destruction consumes the handle, so a world is released at most once.

pub mod handle;
pub mod sandbox;

pub use handle::WorldHandle;
pub use sandbox::SandboxEngine;

use newtonworld_common::EngineSettings;

/// Errors reported by a physics engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine refused to create a world: {limit} worlds already live")]
    CapacityExhausted { limit: usize },
    #[error("engine rejected settings: {0}")]
    InvalidSettings(String),
}

/// Entry points of the external physics engine.
///
/// Both calls are synchronous. `destroy_world` takes the handle by value;
/// the engine must not be handed the same world twice.
pub trait PhysicsEngine {
    /// Instantiate a new simulation world.
    fn create_world(&mut self, settings: &EngineSettings) -> Result<WorldHandle, EngineError>;

    /// Release a world previously returned by `create_world`.
    fn destroy_world(&mut self, handle: WorldHandle);
}
