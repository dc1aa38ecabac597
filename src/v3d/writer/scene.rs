//! Scene state shared between the scene model and the encoder.
//!
//! The scene model appends centers and selects the running center index and
//! material between add calls; the encoder only reads. Mutating the state
//! while an add call is in progress is the caller's responsibility.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::util::DVec3;

/// Emission-order-dependent state read by the encoder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneState {
    /// Append-only table of reference points, flushed at close.
    pub centers: Vec<DVec3>,
    /// Center index stamped into the next records.
    pub center_index: usize,
    /// Material index stamped into the next records.
    pub material_index: u32,
}

/// Cloneable handle to a [`SceneState`].
#[derive(Clone, Debug, Default)]
pub struct SharedScene {
    inner: Arc<RwLock<SceneState>>,
}

impl SharedScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing state.
    pub fn from_state(state: SceneState) -> Self {
        Self { inner: Arc::new(RwLock::new(state)) }
    }

    /// Append a center and return its 1-based index, the value the scene
    /// model stores as its running center index (0 means "no center").
    pub fn add_center(&self, center: DVec3) -> usize {
        let mut state = self.inner.write();
        state.centers.push(center);
        state.centers.len()
    }

    pub fn set_center_index(&self, index: usize) {
        self.inner.write().center_index = index;
    }

    pub fn set_material_index(&self, index: u32) {
        self.inner.write().material_index = index;
    }

    pub fn center_index(&self) -> usize {
        self.inner.read().center_index
    }

    pub fn material_index(&self) -> u32 {
        self.inner.read().material_index
    }

    pub fn read(&self) -> RwLockReadGuard<'_, SceneState> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, SceneState> {
        self.inner.write()
    }
}
