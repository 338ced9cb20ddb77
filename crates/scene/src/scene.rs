use newtonworld_common::{DEFAULT_COLLECTION, EngineSettings, ObjectId, Transform};
use newtonworld_engine::WorldHandle;
use serde::{Deserialize, Serialize};

/// An event record produced by every mutation to a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A collection was added to the scene.
    CollectionCreated { name: String },
    /// An object was linked into a collection.
    ObjectLinked {
        id: ObjectId,
        name: String,
        collection: String,
    },
    /// An object was removed from the scene.
    ObjectUnlinked { id: ObjectId, name: String },
    /// A world was attached to the world property.
    WorldBound { handle: u64, name: String },
    /// The world property was cleared.
    WorldUnbound { handle: u64 },
    /// The bound world's display name changed.
    WorldRenamed { old: String, new: String },
}

/// A named object stored in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub transform: Transform,
}

/// Named, ordered group of objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub objects: Vec<SceneObject>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }
}

/// Value stored in the scene's world property.
///
/// Owns the engine handle; clearing the property hands the binding back to
/// the caller, who must pass the handle to the engine for destruction.
#[derive(Debug)]
pub struct WorldBinding {
    pub handle: WorldHandle,
    pub name: String,
    pub settings: EngineSettings,
}

/// A scene as the host editor exposes it to the add-on.
///
/// The scene owns its collections and the optional world binding. It never
/// talks to the physics engine; the lifecycle layer does that.
#[derive(Debug)]
pub struct Scene {
    name: String,
    collections: Vec<Collection>,
    world: Option<WorldBinding>,
    /// Append-only log of all mutations.
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// A scene with an empty default collection, like a fresh host file.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: vec![Collection::new(DEFAULT_COLLECTION)],
            world: None,
            event_log: Vec::new(),
        }
    }

    /// A scene with no collections at all.
    pub fn without_collections(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Vec::new(),
            world: None,
            event_log: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Total number of objects across all collections.
    pub fn object_count(&self) -> usize {
        self.collections.iter().map(|c| c.objects.len()).sum()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.collections
            .iter()
            .flat_map(|c| c.objects.iter())
            .find(|o| o.id == id)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Link a new object into `collection`, creating the collection if needed.
    pub fn link_object(
        &mut self,
        collection: &str,
        name: impl Into<String>,
        transform: Transform,
    ) -> ObjectId {
        let name = name.into();
        let id = ObjectId::new();
        let index = match self.collections.iter().position(|c| c.name == collection) {
            Some(index) => index,
            None => {
                self.collections.push(Collection::new(collection));
                self.event_log.push(SceneEvent::CollectionCreated {
                    name: collection.to_owned(),
                });
                self.collections.len() - 1
            }
        };
        self.collections[index].objects.push(SceneObject {
            id,
            name: name.clone(),
            transform,
        });
        self.event_log.push(SceneEvent::ObjectLinked {
            id,
            name,
            collection: collection.to_owned(),
        });
        id
    }

    /// Remove an object from whichever collection holds it.
    pub fn unlink_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        for collection in &mut self.collections {
            if let Some(index) = collection.objects.iter().position(|o| o.id == id) {
                let object = collection.objects.remove(index);
                self.event_log.push(SceneEvent::ObjectUnlinked {
                    id,
                    name: object.name.clone(),
                });
                return Some(object);
            }
        }
        None
    }

    pub fn world(&self) -> Option<&WorldBinding> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut WorldBinding> {
        self.world.as_mut()
    }

    /// Store a binding in the world property. Returns the previous binding.
    pub fn bind_world(&mut self, binding: WorldBinding) -> Option<WorldBinding> {
        self.event_log.push(SceneEvent::WorldBound {
            handle: binding.handle.raw(),
            name: binding.name.clone(),
        });
        let previous = self.world.replace(binding);
        if let Some(ref old) = previous {
            tracing::warn!(
                scene = %self.name,
                handle = old.handle.raw(),
                "world property overwritten"
            );
        }
        previous
    }

    /// Clear the world property, returning the binding it held.
    pub fn unbind_world(&mut self) -> Option<WorldBinding> {
        let binding = self.world.take();
        if let Some(ref b) = binding {
            self.event_log.push(SceneEvent::WorldUnbound {
                handle: b.handle.raw(),
            });
        }
        binding
    }

    /// Change the bound world's display name. Returns false if nothing is bound.
    pub fn set_world_name(&mut self, name: impl Into<String>) -> bool {
        let Some(binding) = self.world.as_mut() else {
            return false;
        };
        let new = name.into();
        let old = std::mem::replace(&mut binding.name, new.clone());
        self.event_log.push(SceneEvent::WorldRenamed { old, new });
        true
    }
}
