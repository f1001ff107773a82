// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change evaluation for the anchor registry.
//!
//! Evaluation drains both dirty channels:
//!
//! 1. **GEOMETRY**: slots whose center or extent changed. Surfaces that were
//!    also added in the same window are reported only as added, since a
//!    consumer attaching them reads the latest geometry anyway.
//! 2. **TOPOLOGY**: drained to set [`SurfaceChanges::topology_changed`]; the
//!    ids themselves come from the lifecycle lists, which survive slot reuse.

use alloc::vec::Vec;

use crate::dirty;

use super::id::SurfaceId;
use super::registry::AnchorRegistry;

/// The set of changes produced by a single [`AnchorRegistry::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceChanges {
    /// Surfaces registered since the last evaluate, in detection order.
    pub added: Vec<SurfaceId>,
    /// Surfaces whose geometry changed (and that were not also added).
    pub updated: Vec<SurfaceId>,
    /// Surfaces removed since the last evaluate, in removal order.
    pub removed: Vec<SurfaceId>,
    /// Whether any surface was inserted or removed.
    pub topology_changed: bool,
}

impl SurfaceChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.updated.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.updated.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl AnchorRegistry {
    /// Drains pending changes since the previous call.
    pub fn evaluate(&mut self) -> SurfaceChanges {
        let mut changes = SurfaceChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut SurfaceChanges) {
        changes.clear();

        let dirty_geometry: Vec<u32> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();
        for idx in dirty_geometry {
            let Some(surface) = self.slots.get(idx as usize).and_then(Option::as_ref) else {
                continue;
            };
            if !self.pending_added.contains(&surface.id) {
                changes.updated.push(surface.id);
            }
        }

        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = !topology.is_empty();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::geom::{Extent, Vec3};
    use crate::surface::{DetectedSurface, SurfaceKind};

    fn plane(id: u64) -> DetectedSurface {
        DetectedSurface::new(
            SurfaceId(id),
            SurfaceKind::PlaneHorizontal,
            Vec3::ZERO,
            Extent::new(1.0, 1.0),
        )
    }

    #[test]
    fn fresh_registry_has_no_changes() {
        let mut reg = AnchorRegistry::new();
        assert!(reg.evaluate().is_empty());
    }

    #[test]
    fn detection_reported_once() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1)).unwrap();
        reg.on_detected(plane(2)).unwrap();

        let changes = reg.evaluate();
        assert_eq!(changes.added, vec![SurfaceId(1), SurfaceId(2)]);
        assert!(changes.topology_changed);

        assert!(reg.evaluate().is_empty(), "second evaluate should be clean");
    }

    #[test]
    fn update_reported_after_add_window() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1)).unwrap();
        let _ = reg.evaluate();

        reg.on_updated(SurfaceId(1), Vec3::new(0.0, 1.0, 0.0), Extent::new(2.0, 2.0))
            .unwrap();
        let changes = reg.evaluate();
        assert_eq!(changes.updated, vec![SurfaceId(1)]);
        assert!(changes.added.is_empty());
        assert!(!changes.topology_changed);
    }

    #[test]
    fn update_within_add_window_folds_into_add() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1)).unwrap();
        reg.on_updated(SurfaceId(1), Vec3::ZERO, Extent::new(3.0, 3.0))
            .unwrap();

        let changes = reg.evaluate();
        assert_eq!(changes.added, vec![SurfaceId(1)]);
        assert!(changes.updated.is_empty());
    }

    #[test]
    fn add_then_remove_in_one_window_cancels() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1)).unwrap();
        reg.on_updated(SurfaceId(1), Vec3::ZERO, Extent::new(3.0, 3.0))
            .unwrap();
        reg.on_removed(SurfaceId(1)).unwrap();

        let changes = reg.evaluate();
        assert!(changes.added.is_empty());
        assert!(changes.updated.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn removal_after_update_drops_the_update() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1)).unwrap();
        let _ = reg.evaluate();

        reg.on_updated(SurfaceId(1), Vec3::ZERO, Extent::new(3.0, 3.0))
            .unwrap();
        reg.on_removed(SurfaceId(1)).unwrap();

        let changes = reg.evaluate();
        assert!(changes.updated.is_empty());
        assert_eq!(changes.removed, vec![SurfaceId(1)]);
    }

    #[test]
    fn recycled_slot_is_not_reported_as_updated() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1)).unwrap();
        let _ = reg.evaluate();

        reg.on_updated(SurfaceId(1), Vec3::ZERO, Extent::new(3.0, 3.0))
            .unwrap();
        reg.on_removed(SurfaceId(1)).unwrap();
        reg.on_detected(plane(2)).unwrap();

        let changes = reg.evaluate();
        assert_eq!(changes.added, vec![SurfaceId(2)]);
        assert_eq!(changes.removed, vec![SurfaceId(1)]);
        assert!(changes.updated.is_empty());
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let mut reg = AnchorRegistry::new();
        let mut changes = SurfaceChanges::default();
        reg.on_detected(plane(1)).unwrap();
        reg.evaluate_into(&mut changes);
        assert_eq!(changes.added.len(), 1);

        reg.evaluate_into(&mut changes);
        assert!(changes.is_empty(), "buffer should be cleared");
    }
}
