use newtonworld_author::{LifecycleState, WorldLifecycle};
use newtonworld_common::ObjectId;
use newtonworld_scene::{Scene, SceneObject};

/// Read-only queries against a scene for status lines and debugging.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene's lifecycle and contents.
    pub fn summary(scene: &Scene, lifecycle: &WorldLifecycle) -> SceneSummary {
        let status = lifecycle.status(scene);
        SceneSummary {
            scene: scene.name().to_owned(),
            state: status.state,
            home: status.home,
            orphaned: status.orphaned,
            world_handle: scene.world().map(|w| w.handle.raw()),
            world_name: scene.world().map(|w| w.name.clone()),
            object_count: scene.object_count(),
            collection_count: scene.collections().len(),
            pending_events: scene.events().len(),
        }
    }

    /// Names of all objects, grouped by collection, in iteration order.
    pub fn list_objects(scene: &Scene) -> Vec<(String, Vec<String>)> {
        scene
            .collections()
            .iter()
            .map(|c| {
                let names = c.objects.iter().map(|o| o.name.clone()).collect();
                (c.name.clone(), names)
            })
            .collect()
    }

    pub fn inspect_object(scene: &Scene, id: ObjectId) -> Option<&SceneObject> {
        scene.object(id)
    }
}

/// Summary of a scene for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub scene: String,
    pub state: LifecycleState,
    pub home: Option<ObjectId>,
    pub orphaned: bool,
    pub world_handle: Option<u64>,
    pub world_name: Option<String>,
    pub object_count: usize,
    pub collection_count: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scene '{}': state={:?}", self.scene, self.state)?;
        if let Some(home) = self.home {
            write!(f, " home=[{}]", home.short())?;
        }
        if let (Some(handle), Some(name)) = (self.world_handle, &self.world_name) {
            write!(f, " world=#{handle} '{name}'")?;
        }
        if self.orphaned {
            write!(f, " (orphaned)")?;
        }
        write!(
            f,
            " objects={} collections={} pending_events={}",
            self.object_count, self.collection_count, self.pending_events
        )
    }
}
