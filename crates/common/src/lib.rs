//! Shared types for the Newton world add-on: object ids, transforms,
//! well-known names and the add-on configuration.

pub mod config;
pub mod types;

pub use config::{AddonConfig, ConfigError, EngineSettings};
pub use types::{ObjectId, Transform};

/// Name of the anchor object a physics world is attached to.
pub const HOME_OBJECT_NAME: &str = "newtonHome";

/// Name of the scene collection the home object lives in.
pub const DEFAULT_COLLECTION: &str = "Collection";

/// Property key under which the world reference is attached to a scene.
pub const WORLD_PROPERTY_KEY: &str = "newton_world";

/// Display name given to a freshly created world.
pub const DEFAULT_WORLD_NAME: &str = "newton world";
