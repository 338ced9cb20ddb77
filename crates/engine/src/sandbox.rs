use std::collections::BTreeMap;

use newtonworld_common::EngineSettings;

use crate::{EngineError, PhysicsEngine, WorldHandle};

/// In-process engine that keeps a registry of live worlds.
///
/// Stands in for the native engine in tests and the CLI. Ids start at 1 and
/// are never reused, so a stale id can always be told apart from a live one.
#[derive(Debug, Default)]
pub struct SandboxEngine {
    live: BTreeMap<u64, EngineSettings>,
    next_id: u64,
    limit: Option<usize>,
    created: u64,
    destroyed: u64,
}

impl SandboxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that refuses to hold more than `limit` live worlds.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Number of worlds currently alive.
    pub fn live_worlds(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, raw: u64) -> bool {
        self.live.contains_key(&raw)
    }

    /// Settings a live world was created with.
    pub fn settings(&self, raw: u64) -> Option<&EngineSettings> {
        self.live.get(&raw)
    }

    pub fn created_total(&self) -> u64 {
        self.created
    }

    pub fn destroyed_total(&self) -> u64 {
        self.destroyed
    }
}

impl PhysicsEngine for SandboxEngine {
    fn create_world(&mut self, settings: &EngineSettings) -> Result<WorldHandle, EngineError> {
        settings
            .validate()
            .map_err(|e| EngineError::InvalidSettings(e.to_string()))?;
        if let Some(limit) = self.limit.filter(|&limit| self.live.len() >= limit) {
            return Err(EngineError::CapacityExhausted { limit });
        }

        self.next_id += 1;
        let raw = self.next_id;
        self.live.insert(raw, *settings);
        self.created += 1;
        tracing::debug!(
            handle = raw,
            sub_steps = settings.sub_steps,
            solver_iterations = settings.solver_iterations,
            "engine world created"
        );
        Ok(WorldHandle::from_raw(raw))
    }

    fn destroy_world(&mut self, handle: WorldHandle) {
        let raw = handle.into_raw();
        if self.live.remove(&raw).is_some() {
            self.destroyed += 1;
            tracing::debug!(handle = raw, "engine world destroyed");
        } else {
            tracing::error!(handle = raw, "destroy_world called with unknown handle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut engine = SandboxEngine::new();
        let handle = engine.create_world(&EngineSettings::default()).unwrap();
        let raw = handle.raw();
        assert!(engine.is_live(raw));
        assert_eq!(engine.live_worlds(), 1);

        engine.destroy_world(handle);
        assert!(!engine.is_live(raw));
        assert_eq!(engine.live_worlds(), 0);
        assert_eq!(engine.created_total(), 1);
        assert_eq!(engine.destroyed_total(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut engine = SandboxEngine::new();
        let a = engine.create_world(&EngineSettings::default()).unwrap();
        let a_raw = a.raw();
        engine.destroy_world(a);
        let b = engine.create_world(&EngineSettings::default()).unwrap();
        assert_ne!(a_raw, b.raw());
        engine.destroy_world(b);
    }

    #[test]
    fn capacity_limit_enforced() {
        let mut engine = SandboxEngine::with_capacity_limit(1);
        let first = engine.create_world(&EngineSettings::default()).unwrap();
        let err = engine
            .create_world(&EngineSettings::default())
            .unwrap_err();
        assert_eq!(err, EngineError::CapacityExhausted { limit: 1 });
        assert_eq!(engine.live_worlds(), 1);
        engine.destroy_world(first);
    }

    #[test]
    fn invalid_settings_rejected() {
        let mut engine = SandboxEngine::new();
        let settings = EngineSettings {
            sub_steps: 0,
            ..EngineSettings::default()
        };
        let err = engine.create_world(&settings).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSettings(_)));
        assert_eq!(engine.created_total(), 0);
    }

    #[test]
    fn settings_are_recorded() {
        let mut engine = SandboxEngine::new();
        let settings = EngineSettings {
            sub_steps: 4,
            solver_iterations: 16,
            worker_threads: 2,
        };
        let handle = engine.create_world(&settings).unwrap();
        assert_eq!(engine.settings(handle.raw()), Some(&settings));
        engine.destroy_world(handle);
    }

    #[test]
    fn destroying_foreign_handle_is_ignored() {
        let mut engine = SandboxEngine::new();
        engine.destroy_world(WorldHandle::from_raw(99));
        assert_eq!(engine.destroyed_total(), 0);
    }
}
