use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::lifecycle::LifecycleState;

/// A user-invocable lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    CreateHome,
    CreateWorld,
    DestroyWorld,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::CreateHome,
        ActionKind::CreateWorld,
        ActionKind::DestroyWorld,
    ];

    /// Button text shown by the panel.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::CreateHome => "Create Home",
            ActionKind::CreateWorld => "Create World",
            ActionKind::DestroyWorld => "Destroy World",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions the UI should offer in `state`. Always exactly one.
pub fn visible_actions(state: LifecycleState) -> BTreeSet<ActionKind> {
    let action = match state {
        LifecycleState::NoHome => ActionKind::CreateHome,
        LifecycleState::HomeOnly => ActionKind::CreateWorld,
        LifecycleState::WorldBound => ActionKind::DestroyWorld,
    };
    BTreeSet::from([action])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_state_offers_its_transition() {
        assert_eq!(
            visible_actions(LifecycleState::NoHome),
            BTreeSet::from([ActionKind::CreateHome])
        );
        assert_eq!(
            visible_actions(LifecycleState::HomeOnly),
            BTreeSet::from([ActionKind::CreateWorld])
        );
        assert_eq!(
            visible_actions(LifecycleState::WorldBound),
            BTreeSet::from([ActionKind::DestroyWorld])
        );
    }

    #[test]
    fn every_state_offers_exactly_one_action() {
        for state in LifecycleState::ALL {
            assert_eq!(visible_actions(state).len(), 1, "{state:?}");
        }
    }

    #[test]
    fn every_action_is_offered_somewhere() {
        let offered: BTreeSet<ActionKind> = LifecycleState::ALL
            .into_iter()
            .flat_map(visible_actions)
            .collect();
        assert_eq!(offered, BTreeSet::from(ActionKind::ALL));
    }
}
