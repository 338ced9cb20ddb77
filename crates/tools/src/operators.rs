use std::collections::BTreeMap;

use newtonworld_author::{ActionKind, LifecycleError, LifecycleState, WorldLifecycle, visible_actions};
use newtonworld_engine::PhysicsEngine;
use newtonworld_scene::{ObjectStore, WorldProperty};
use serde::Serialize;

pub const CREATE_HOME_OPERATOR: &str = "view3d.newton_world_create_home";
pub const CREATE_WORLD_OPERATOR: &str = "view3d.newton_world_create";
pub const DESTROY_WORLD_OPERATOR: &str = "view3d.newton_world_destroy";

/// Errors from operator registration and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("operator {0:?} is already registered")]
    AlreadyRegistered(String),
    #[error("unknown operator {0:?}")]
    UnknownOperator(String),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// A registered, invocable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorDescriptor {
    pub id_name: String,
    pub label: String,
    pub description: String,
    pub action: ActionKind,
}

impl OperatorDescriptor {
    pub fn for_action(action: ActionKind) -> Self {
        let (id_name, description) = match action {
            ActionKind::CreateHome => (
                CREATE_HOME_OPERATOR,
                "Add the home object a physics world is anchored to",
            ),
            ActionKind::CreateWorld => (
                CREATE_WORLD_OPERATOR,
                "Create a physics world for this scene",
            ),
            ActionKind::DestroyWorld => (
                DESTROY_WORLD_OPERATOR,
                "Destroy the physics world bound to this scene",
            ),
        };
        Self {
            id_name: id_name.to_owned(),
            label: action.label().to_owned(),
            description: description.to_owned(),
            action,
        }
    }
}

/// Result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorOutcome {
    pub id_name: String,
    pub action: ActionKind,
    /// State of the scene after the transition.
    pub state: LifecycleState,
}

/// Operator table the host dispatches into.
///
/// Owns the lifecycle configuration; each call receives the scene it should
/// act on, standing in for the host's current-scene context.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    lifecycle: WorldLifecycle,
    operators: BTreeMap<String, OperatorDescriptor>,
}

impl OperatorRegistry {
    /// Empty registry.
    pub fn new(lifecycle: WorldLifecycle) -> Self {
        Self {
            lifecycle,
            operators: BTreeMap::new(),
        }
    }

    /// Registry with the three lifecycle operators registered.
    pub fn with_lifecycle_operators(lifecycle: WorldLifecycle) -> Self {
        let mut registry = Self::new(lifecycle);
        for action in ActionKind::ALL {
            // Fresh registry, ids are distinct.
            let _ = registry.register(OperatorDescriptor::for_action(action));
        }
        registry
    }

    pub fn lifecycle(&self) -> &WorldLifecycle {
        &self.lifecycle
    }

    pub fn register(&mut self, descriptor: OperatorDescriptor) -> Result<(), DispatchError> {
        if self.operators.contains_key(&descriptor.id_name) {
            return Err(DispatchError::AlreadyRegistered(descriptor.id_name));
        }
        tracing::debug!(id_name = %descriptor.id_name, "operator registered");
        self.operators
            .insert(descriptor.id_name.clone(), descriptor);
        Ok(())
    }

    pub fn unregister(&mut self, id_name: &str) -> Option<OperatorDescriptor> {
        let removed = self.operators.remove(id_name);
        if removed.is_some() {
            tracing::debug!(id_name, "operator unregistered");
        }
        removed
    }

    /// Registered operators ordered by id name.
    pub fn operators(&self) -> impl Iterator<Item = &OperatorDescriptor> {
        self.operators.values()
    }

    pub fn get(&self, id_name: &str) -> Option<&OperatorDescriptor> {
        self.operators.get(id_name)
    }

    /// The registered operator that runs `action`, if any.
    pub fn operator_for(&self, action: ActionKind) -> Option<&OperatorDescriptor> {
        self.operators.values().find(|d| d.action == action)
    }

    /// Whether the UI should currently offer `id_name` for `scene`.
    pub fn poll<S>(&self, id_name: &str, scene: &S) -> bool
    where
        S: ObjectStore + WorldProperty,
    {
        self.operators.get(id_name).is_some_and(|descriptor| {
            visible_actions(self.lifecycle.state(scene)).contains(&descriptor.action)
        })
    }

    /// Run the operator registered as `id_name` against `scene`.
    pub fn invoke<S>(
        &self,
        id_name: &str,
        scene: &mut S,
        engine: &mut dyn PhysicsEngine,
    ) -> Result<OperatorOutcome, DispatchError>
    where
        S: ObjectStore + WorldProperty,
    {
        let descriptor = self
            .operators
            .get(id_name)
            .ok_or_else(|| DispatchError::UnknownOperator(id_name.to_owned()))?;
        let state = self
            .lifecycle
            .apply(descriptor.action, scene, engine)
            .inspect_err(|e| tracing::warn!(id_name, error = %e, "operator cancelled"))?;
        Ok(OperatorOutcome {
            id_name: descriptor.id_name.clone(),
            action: descriptor.action,
            state,
        })
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_lifecycle_operators(WorldLifecycle::default())
    }
}
