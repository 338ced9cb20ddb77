use serde::Serialize;

/// Registration metadata the host shows in its add-on list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub version: (u32, u32, u32),
    /// Oldest host release the add-on supports.
    pub host_version: (u32, u32, u32),
    pub location: &'static str,
    pub description: &'static str,
}

impl AddonInfo {
    pub const fn newton() -> Self {
        Self {
            name: "Newton Physics",
            category: "Physics",
            author: "Newton Dynamics",
            version: (1, 0, 0),
            host_version: (2, 93, 0),
            location: "View3D",
            description: "Add Newton Physics to meshes",
        }
    }
}

impl Default for AddonInfo {
    fn default() -> Self {
        Self::newton()
    }
}

impl std::fmt::Display for AddonInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (major, minor, patch) = self.version;
        write!(
            f,
            "{} v{major}.{minor}.{patch} [{}] by {} ({})",
            self.name, self.category, self.author, self.location
        )
    }
}
