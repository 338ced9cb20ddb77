/// Owned reference to a live engine world.
///
/// Not `Clone`: the scene that stores it is the single owner. The handle
/// cannot release the world on its own, so dropping one that never went
/// through `PhysicsEngine::destroy_world` is reported as a leak.
#[derive(Debug, PartialEq, Eq)]
pub struct WorldHandle {
    raw: u64,
    armed: bool,
}

impl WorldHandle {
    /// Wrap a raw engine id. Only engine implementations should call this.
    pub fn from_raw(raw: u64) -> Self {
        Self { raw, armed: true }
    }

    /// The engine-side id.
    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// Give up ownership, returning the engine-side id.
    pub fn into_raw(mut self) -> u64 {
        self.armed = false;
        self.raw
    }
}

impl Drop for WorldHandle {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(
                handle = self.raw,
                "world handle dropped without destroy_world; engine world leaked"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_raw_returns_id() {
        let handle = WorldHandle::from_raw(7);
        assert_eq!(handle.raw(), 7);
        assert_eq!(handle.into_raw(), 7);
    }

    #[test]
    fn dropping_armed_handle_does_not_panic() {
        let handle = WorldHandle::from_raw(3);
        drop(handle);
    }
}
