use newtonworld_common::{AddonConfig, DEFAULT_COLLECTION, HOME_OBJECT_NAME};
use newtonworld_scene::{ObjectStore, SceneObject};

/// Finds the home object a world is anchored to.
///
/// Lookup is a plain name scan over one collection; nothing is cached, so
/// every call sees the host's current objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLocator {
    home_name: String,
    collection_name: String,
}

impl HomeLocator {
    pub fn new(home_name: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            home_name: home_name.into(),
            collection_name: collection_name.into(),
        }
    }

    pub fn from_config(config: &AddonConfig) -> Self {
        Self::new(&config.home_name, &config.collection_name)
    }

    pub fn home_name(&self) -> &str {
        &self.home_name
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// First object in the home collection whose name matches exactly.
    ///
    /// `None` if the collection is absent or holds no such object.
    pub fn find_home<'s, S: ObjectStore>(&self, store: &'s S) -> Option<&'s SceneObject> {
        store
            .collection_objects(&self.collection_name)?
            .iter()
            .find(|object| object.name == self.home_name)
    }

    /// Number of objects carrying the home name.
    pub fn count_homes<S: ObjectStore>(&self, store: &S) -> usize {
        store
            .collection_objects(&self.collection_name)
            .map_or(0, |objects| {
                objects.iter().filter(|o| o.name == self.home_name).count()
            })
    }
}

impl Default for HomeLocator {
    fn default() -> Self {
        Self::new(HOME_OBJECT_NAME, DEFAULT_COLLECTION)
    }
}
