use newtonworld_author::{LifecycleState, visible_actions};
use newtonworld_scene::{ObjectStore, WorldProperty};
use serde::Serialize;

use crate::operators::OperatorRegistry;

pub const PANEL_TITLE: &str = "Newton Physics";
pub const PANEL_CATEGORY: &str = "newton";

/// Value shown by a property row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Int(u32),
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Int(n) => write!(f, "{n}"),
        }
    }
}

/// One row of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelItem {
    Operator {
        id_name: String,
        label: String,
    },
    Label {
        text: String,
    },
    Warning {
        text: String,
    },
    Property {
        key: String,
        value: PropertyValue,
        editable: bool,
    },
}

/// What the panel shows for one redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelLayout {
    pub title: &'static str,
    pub category: &'static str,
    pub state: LifecycleState,
    pub items: Vec<PanelItem>,
}

impl PanelLayout {
    /// Id names of the operator buttons, in display order.
    pub fn operators(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PanelItem::Operator { id_name, .. } => Some(id_name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.items.iter().find_map(|item| match item {
            PanelItem::Property { key: k, value, .. } if k == key => Some(value),
            _ => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PanelItem::Warning { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl std::fmt::Display for PanelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}] {} ({:?})", self.category, self.title, self.state)?;
        for item in &self.items {
            match item {
                PanelItem::Operator { label, id_name } => writeln!(f, "  <{label}>  {id_name}")?,
                PanelItem::Label { text } => writeln!(f, "  {text}")?,
                PanelItem::Warning { text } => writeln!(f, "  ! {text}")?,
                PanelItem::Property {
                    key,
                    value,
                    editable,
                } => {
                    let access = if *editable { "rw" } else { "ro" };
                    writeln!(f, "    {key} = {value} [{access}]")?
                }
            }
        }
        Ok(())
    }
}

/// The sidebar panel of the 3D view.
pub struct NewtonPanel;

impl NewtonPanel {
    /// Build the layout for the scene's current state.
    ///
    /// Only operators the visibility policy allows are offered. Engine
    /// configuration is listed while a world is bound.
    pub fn draw<S>(scene: &S, registry: &OperatorRegistry) -> PanelLayout
    where
        S: ObjectStore + WorldProperty,
    {
        let lifecycle = registry.lifecycle();
        let status = lifecycle.status(scene);
        let mut items = Vec::new();

        for action in visible_actions(status.state) {
            if let Some(descriptor) = registry.operator_for(action) {
                items.push(PanelItem::Operator {
                    id_name: descriptor.id_name.clone(),
                    label: descriptor.label.clone(),
                });
            }
        }

        if status.orphaned {
            items.push(PanelItem::Warning {
                text: format!(
                    "home object '{}' is missing",
                    lifecycle.locator().home_name()
                ),
            });
        }
        if status.duplicate_homes {
            items.push(PanelItem::Warning {
                text: format!(
                    "several objects are named '{}'; using the first",
                    lifecycle.locator().home_name()
                ),
            });
        }

        if let Some(world) = scene.world() {
            items.push(PanelItem::Label {
                text: "Engine Configuration".into(),
            });
            items.push(PanelItem::Property {
                key: "name".into(),
                value: PropertyValue::Text(world.name.clone()),
                editable: true,
            });
            items.push(PanelItem::Property {
                key: "sub_steps".into(),
                value: PropertyValue::Int(world.settings.sub_steps),
                editable: false,
            });
            items.push(PanelItem::Property {
                key: "solver_iterations".into(),
                value: PropertyValue::Int(world.settings.solver_iterations),
                editable: false,
            });
        }

        PanelLayout {
            title: PANEL_TITLE,
            category: PANEL_CATEGORY,
            state: status.state,
            items,
        }
    }
}
