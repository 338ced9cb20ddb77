//! Host contracts the lifecycle core is written against.

use newtonworld_common::{ObjectId, Transform};

use crate::scene::{Scene, SceneObject, WorldBinding};

/// Object/collection store of the host editor.
pub trait ObjectStore {
    /// Objects of a collection in host iteration order, or `None` if the
    /// collection does not exist.
    fn collection_objects(&self, collection: &str) -> Option<&[SceneObject]>;

    /// Insert a new named object, creating the collection if needed.
    fn link_object(&mut self, collection: &str, name: &str, transform: Transform) -> ObjectId;
}

/// The single optional world reference a scene carries.
pub trait WorldProperty {
    fn world(&self) -> Option<&WorldBinding>;

    fn world_mut(&mut self) -> Option<&mut WorldBinding>;

    /// Store a binding, returning whatever was there before.
    fn bind_world(&mut self, binding: WorldBinding) -> Option<WorldBinding>;

    /// Clear the reference, returning the binding it held.
    fn unbind_world(&mut self) -> Option<WorldBinding>;

    /// Write the display name of the bound world. False if nothing is bound.
    fn set_world_name(&mut self, name: &str) -> bool;
}

impl ObjectStore for Scene {
    fn collection_objects(&self, collection: &str) -> Option<&[SceneObject]> {
        self.collection(collection).map(|c| c.objects.as_slice())
    }

    fn link_object(&mut self, collection: &str, name: &str, transform: Transform) -> ObjectId {
        Scene::link_object(self, collection, name, transform)
    }
}

impl WorldProperty for Scene {
    fn world(&self) -> Option<&WorldBinding> {
        Scene::world(self)
    }

    fn world_mut(&mut self) -> Option<&mut WorldBinding> {
        Scene::world_mut(self)
    }

    fn bind_world(&mut self, binding: WorldBinding) -> Option<WorldBinding> {
        Scene::bind_world(self, binding)
    }

    fn unbind_world(&mut self) -> Option<WorldBinding> {
        Scene::unbind_world(self)
    }

    fn set_world_name(&mut self, name: &str) -> bool {
        Scene::set_world_name(self, name)
    }
}
