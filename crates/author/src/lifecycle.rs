use newtonworld_common::{AddonConfig, EngineSettings, ObjectId, Transform};
use newtonworld_engine::{EngineError, PhysicsEngine};
use newtonworld_scene::{ObjectStore, WorldBinding, WorldProperty};
use serde::{Deserialize, Serialize};

use crate::home::HomeLocator;
use crate::visibility::ActionKind;

/// Where a scene stands in the world lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// No home object exists.
    NoHome,
    /// A home object exists but no world is bound.
    HomeOnly,
    /// A world is bound to the scene.
    WorldBound,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 3] = [
        LifecycleState::NoHome,
        LifecycleState::HomeOnly,
        LifecycleState::WorldBound,
    ];
}

/// Precondition failures of lifecycle transitions.
///
/// Raised before anything is mutated. The caller should re-derive the state
/// and re-offer actions rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("home object already exists ({0})")]
    AlreadyExists(ObjectId),
    #[error("no home object; create one before creating a world")]
    MissingHome,
    #[error("a physics world is already bound to this scene")]
    AlreadyBound,
    #[error("no physics world is bound to this scene")]
    NotBound,
    #[error("physics engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Derived state plus the diagnostics the panel and inspector show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStatus {
    pub state: LifecycleState,
    pub home: Option<ObjectId>,
    /// A world is bound but its home object has been removed.
    pub orphaned: bool,
    /// More than one object carries the home name.
    pub duplicate_homes: bool,
}

/// The world lifecycle state machine.
///
/// Holds only configuration. Every operation takes the scene explicitly and
/// derives the current state from it, so external edits to the scene are
/// always observed.
#[derive(Debug, Clone)]
pub struct WorldLifecycle {
    locator: HomeLocator,
    world_name: String,
    settings: EngineSettings,
}

impl WorldLifecycle {
    pub fn new(config: &AddonConfig) -> Self {
        Self {
            locator: HomeLocator::from_config(config),
            world_name: config.world_name.clone(),
            settings: config.engine,
        }
    }

    pub fn locator(&self) -> &HomeLocator {
        &self.locator
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Current state of `scene`.
    pub fn state<S>(&self, scene: &S) -> LifecycleState
    where
        S: ObjectStore + WorldProperty,
    {
        if scene.world().is_some() {
            LifecycleState::WorldBound
        } else if self.locator.find_home(scene).is_some() {
            LifecycleState::HomeOnly
        } else {
            LifecycleState::NoHome
        }
    }

    pub fn status<S>(&self, scene: &S) -> LifecycleStatus
    where
        S: ObjectStore + WorldProperty,
    {
        let home = self.locator.find_home(scene).map(|o| o.id);
        let duplicate_homes = self.locator.count_homes(scene) > 1;
        if duplicate_homes {
            tracing::warn!(
                home = self.locator.home_name(),
                "multiple home objects found; using the first"
            );
        }
        LifecycleStatus {
            state: self.state(scene),
            home,
            orphaned: scene.world().is_some() && home.is_none(),
            duplicate_homes,
        }
    }

    /// Insert a new home object into the home collection.
    pub fn create_home<S>(&self, scene: &mut S) -> Result<ObjectId, LifecycleError>
    where
        S: ObjectStore + WorldProperty,
    {
        if let Some(existing) = self.locator.find_home(&*scene) {
            tracing::warn!(id = %existing.id, "create_home refused: home already exists");
            return Err(LifecycleError::AlreadyExists(existing.id));
        }
        let id = scene.link_object(
            self.locator.collection_name(),
            self.locator.home_name(),
            Transform::default(),
        );
        tracing::info!(%id, collection = self.locator.collection_name(), "home object created");
        Ok(id)
    }

    /// Create an engine world and bind it to the scene.
    pub fn create_world<S, E>(&self, scene: &mut S, engine: &mut E) -> Result<(), LifecycleError>
    where
        S: ObjectStore + WorldProperty,
        E: PhysicsEngine + ?Sized,
    {
        if scene.world().is_some() {
            tracing::warn!("create_world refused: world already bound");
            return Err(LifecycleError::AlreadyBound);
        }
        if self.locator.find_home(&*scene).is_none() {
            tracing::warn!("create_world refused: no home object");
            return Err(LifecycleError::MissingHome);
        }

        let handle = engine.create_world(&self.settings)?;
        let raw = handle.raw();
        let binding = WorldBinding {
            handle,
            name: self.world_name.clone(),
            settings: self.settings,
        };
        if let Some(stale) = scene.bind_world(binding) {
            engine.destroy_world(stale.handle);
        }
        tracing::info!(handle = raw, name = %self.world_name, "physics world created");
        Ok(())
    }

    /// Release the bound world and clear the reference. The home stays.
    pub fn destroy_world<S, E>(&self, scene: &mut S, engine: &mut E) -> Result<(), LifecycleError>
    where
        S: ObjectStore + WorldProperty,
        E: PhysicsEngine + ?Sized,
    {
        let Some(binding) = scene.unbind_world() else {
            tracing::warn!("destroy_world refused: no world bound");
            return Err(LifecycleError::NotBound);
        };
        let raw = binding.handle.raw();
        engine.destroy_world(binding.handle);
        tracing::info!(handle = raw, "physics world destroyed");
        Ok(())
    }

    /// Write the bound world's display name.
    pub fn rename_world<S>(&self, scene: &mut S, name: &str) -> Result<(), LifecycleError>
    where
        S: ObjectStore + WorldProperty,
    {
        if !scene.set_world_name(name) {
            return Err(LifecycleError::NotBound);
        }
        tracing::debug!(name, "physics world renamed");
        Ok(())
    }

    /// Run the transition for `action` and return the resulting state.
    pub fn apply<S, E>(
        &self,
        action: ActionKind,
        scene: &mut S,
        engine: &mut E,
    ) -> Result<LifecycleState, LifecycleError>
    where
        S: ObjectStore + WorldProperty,
        E: PhysicsEngine + ?Sized,
    {
        match action {
            ActionKind::CreateHome => {
                self.create_home(scene)?;
            }
            ActionKind::CreateWorld => self.create_world(scene, engine)?,
            ActionKind::DestroyWorld => self.destroy_world(scene, engine)?,
        }
        Ok(self.state(&*scene))
    }
}

impl Default for WorldLifecycle {
    fn default() -> Self {
        Self::new(&AddonConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newtonworld_common::DEFAULT_COLLECTION;
    use newtonworld_engine::SandboxEngine;
    use newtonworld_scene::Scene;

    fn setup() -> (Scene, SandboxEngine, WorldLifecycle) {
        (
            Scene::new("Scene"),
            SandboxEngine::new(),
            WorldLifecycle::default(),
        )
    }

    #[test]
    fn empty_scene_is_no_home() {
        let (scene, _, lifecycle) = setup();
        assert_eq!(lifecycle.state(&scene), LifecycleState::NoHome);
    }

    #[test]
    fn create_home_moves_to_home_only() {
        let (mut scene, _, lifecycle) = setup();
        let id = lifecycle.create_home(&mut scene).unwrap();
        assert_eq!(lifecycle.state(&scene), LifecycleState::HomeOnly);
        assert_eq!(scene.object(id).unwrap().name, "newtonHome");
    }

    #[test]
    fn create_home_twice_fails() {
        let (mut scene, _, lifecycle) = setup();
        let id = lifecycle.create_home(&mut scene).unwrap();
        let err = lifecycle.create_home(&mut scene).unwrap_err();
        assert_eq!(err, LifecycleError::AlreadyExists(id));
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn create_home_guards_against_external_home() {
        let (mut scene, _, lifecycle) = setup();
        scene.link_object(DEFAULT_COLLECTION, "newtonHome", Transform::default());
        assert!(matches!(
            lifecycle.create_home(&mut scene),
            Err(LifecycleError::AlreadyExists(_))
        ));
    }

    #[test]
    fn create_home_without_collection_creates_it() {
        let mut scene = Scene::without_collections("Scene");
        let lifecycle = WorldLifecycle::default();
        lifecycle.create_home(&mut scene).unwrap();
        assert!(scene.collection(DEFAULT_COLLECTION).is_some());
        assert_eq!(lifecycle.state(&scene), LifecycleState::HomeOnly);
    }

    #[test]
    fn create_world_without_home_fails_cleanly() {
        let (mut scene, mut engine, lifecycle) = setup();
        let err = lifecycle.create_world(&mut scene, &mut engine).unwrap_err();
        assert_eq!(err, LifecycleError::MissingHome);
        assert!(scene.world().is_none());
        assert_eq!(engine.created_total(), 0);
    }

    #[test]
    fn create_world_binds_handle() {
        let (mut scene, mut engine, lifecycle) = setup();
        lifecycle.create_home(&mut scene).unwrap();
        lifecycle.create_world(&mut scene, &mut engine).unwrap();

        let binding = scene.world().unwrap();
        assert!(engine.is_live(binding.handle.raw()));
        assert_eq!(binding.name, "newton world");
        assert_eq!(lifecycle.state(&scene), LifecycleState::WorldBound);
    }

    #[test]
    fn second_create_world_fails_already_bound() {
        let (mut scene, mut engine, lifecycle) = setup();
        lifecycle.create_home(&mut scene).unwrap();
        lifecycle.create_world(&mut scene, &mut engine).unwrap();
        let raw = scene.world().unwrap().handle.raw();

        let err = lifecycle.create_world(&mut scene, &mut engine).unwrap_err();
        assert_eq!(err, LifecycleError::AlreadyBound);
        assert_eq!(scene.world().unwrap().handle.raw(), raw);
        assert_eq!(engine.live_worlds(), 1);
    }

    #[test]
    fn engine_failure_leaves_scene_untouched() {
        let mut scene = Scene::new("Scene");
        let mut engine = SandboxEngine::with_capacity_limit(0);
        let lifecycle = WorldLifecycle::default();
        lifecycle.create_home(&mut scene).unwrap();
        let events_before = scene.events().len();

        let err = lifecycle.create_world(&mut scene, &mut engine).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::Engine(EngineError::CapacityExhausted { limit: 0 })
        );
        assert!(scene.world().is_none());
        assert_eq!(scene.events().len(), events_before);
        assert_eq!(lifecycle.state(&scene), LifecycleState::HomeOnly);
    }

    #[test]
    fn destroy_world_releases_handle_and_keeps_home() {
        let (mut scene, mut engine, lifecycle) = setup();
        let home = lifecycle.create_home(&mut scene).unwrap();
        lifecycle.create_world(&mut scene, &mut engine).unwrap();
        let raw = scene.world().unwrap().handle.raw();

        lifecycle.destroy_world(&mut scene, &mut engine).unwrap();
        assert!(scene.world().is_none());
        assert!(!engine.is_live(raw));
        assert_eq!(lifecycle.locator().find_home(&scene).unwrap().id, home);
        assert_eq!(lifecycle.state(&scene), LifecycleState::HomeOnly);
    }

    #[test]
    fn destroy_without_world_fails_not_bound() {
        let (mut scene, mut engine, lifecycle) = setup();
        let err = lifecycle.destroy_world(&mut scene, &mut engine).unwrap_err();
        assert_eq!(err, LifecycleError::NotBound);
        assert_eq!(engine.destroyed_total(), 0);
    }

    #[test]
    fn rename_requires_bound_world() {
        let (mut scene, mut engine, lifecycle) = setup();
        assert_eq!(
            lifecycle.rename_world(&mut scene, "sim"),
            Err(LifecycleError::NotBound)
        );

        lifecycle.create_home(&mut scene).unwrap();
        lifecycle.create_world(&mut scene, &mut engine).unwrap();
        lifecycle.rename_world(&mut scene, "sim").unwrap();
        assert_eq!(scene.world().unwrap().name, "sim");
    }

    #[test]
    fn configured_settings_reach_engine() {
        let config = AddonConfig {
            engine: EngineSettings {
                sub_steps: 8,
                solver_iterations: 32,
                worker_threads: 4,
            },
            ..AddonConfig::default()
        };
        let lifecycle = WorldLifecycle::new(&config);
        let mut scene = Scene::new("Scene");
        let mut engine = SandboxEngine::new();
        lifecycle.create_home(&mut scene).unwrap();
        lifecycle.create_world(&mut scene, &mut engine).unwrap();

        let raw = scene.world().unwrap().handle.raw();
        assert_eq!(engine.settings(raw), Some(&config.engine));
        assert_eq!(scene.world().unwrap().settings, config.engine);
    }

    #[test]
    fn apply_returns_new_state() {
        let (mut scene, mut engine, lifecycle) = setup();
        assert_eq!(
            lifecycle.apply(ActionKind::CreateHome, &mut scene, &mut engine),
            Ok(LifecycleState::HomeOnly)
        );
        assert_eq!(
            lifecycle.apply(ActionKind::CreateWorld, &mut scene, &mut engine),
            Ok(LifecycleState::WorldBound)
        );
        assert_eq!(
            lifecycle.apply(ActionKind::DestroyWorld, &mut scene, &mut engine),
            Ok(LifecycleState::HomeOnly)
        );
    }

    #[test]
    fn apply_through_dyn_engine() {
        let mut scene = Scene::new("Scene");
        let mut sandbox = SandboxEngine::new();
        let engine: &mut dyn PhysicsEngine = &mut sandbox;
        let lifecycle = WorldLifecycle::default();
        lifecycle
            .apply(ActionKind::CreateHome, &mut scene, engine)
            .unwrap();
        lifecycle
            .apply(ActionKind::CreateWorld, &mut scene, engine)
            .unwrap();
        assert_eq!(sandbox.live_worlds(), 1);
    }

    #[test]
    fn removed_home_leaves_world_orphaned() {
        let (mut scene, mut engine, lifecycle) = setup();
        let home = lifecycle.create_home(&mut scene).unwrap();
        lifecycle.create_world(&mut scene, &mut engine).unwrap();

        scene.unlink_object(home);
        let status = lifecycle.status(&scene);
        assert_eq!(status.state, LifecycleState::WorldBound);
        assert!(status.orphaned);
        assert!(status.home.is_none());

        // Orphaned worlds can still be torn down, after which a new home can be made.
        lifecycle.destroy_world(&mut scene, &mut engine).unwrap();
        assert_eq!(lifecycle.state(&scene), LifecycleState::NoHome);
        lifecycle.create_home(&mut scene).unwrap();
    }

    #[test]
    fn status_flags_duplicate_homes() {
        let (mut scene, _, lifecycle) = setup();
        let first = scene.link_object(DEFAULT_COLLECTION, "newtonHome", Transform::default());
        scene.link_object(DEFAULT_COLLECTION, "newtonHome", Transform::default());

        let status = lifecycle.status(&scene);
        assert!(status.duplicate_homes);
        assert_eq!(status.home, Some(first));
        assert!(!status.orphaned);
    }
}
