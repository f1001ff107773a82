// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-based surface storage mirroring detection-service notifications.

use alloc::vec::Vec;

use hashbrown::HashMap;
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::error::RegistryError;
use crate::geom::{Extent, Vec3};

use super::id::{SurfaceId, SurfaceKind};

/// A real-world surface currently tracked by the detection service.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectedSurface {
    /// Stable identifier assigned by the detection service.
    pub id: SurfaceId,
    /// Center of the planar region, in world space.
    pub center: Vec3,
    /// Planar size of the region.
    pub extent: Extent,
    /// What the surface was detected from.
    pub kind: SurfaceKind,
}

impl DetectedSurface {
    /// Creates a surface record.
    #[inline]
    #[must_use]
    pub const fn new(id: SurfaceId, kind: SurfaceKind, center: Vec3, extent: Extent) -> Self {
        Self {
            id,
            center,
            extent,
            kind,
        }
    }
}

/// The authoritative set of tracked surfaces.
///
/// The registry mirrors the detection service exactly: entries appear on
/// [`on_detected`](Self::on_detected), change on
/// [`on_updated`](Self::on_updated), and disappear on
/// [`on_removed`](Self::on_removed). It never synthesizes or drops entries
/// on its own.
///
/// Entries live in slots recycled through a free list. A separate list keeps
/// insertion order for [`list_all`](Self::list_all), and an id index makes
/// lookups constant-time.
#[derive(Debug)]
pub struct AnchorRegistry {
    // -- Storage --
    pub(crate) slots: Vec<Option<DetectedSurface>>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) index: HashMap<SurfaceId, u32>,
    pub(crate) order: Vec<SurfaceId>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<SurfaceId>,
    pub(crate) pending_removed: Vec<SurfaceId>,
}

impl Default for AnchorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            index: HashMap::new(),
            order: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Notification API --

    /// Registers a newly detected surface.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if a surface with the same id is
    /// already registered; the registry is left unchanged.
    pub fn on_detected(&mut self, surface: DetectedSurface) -> Result<(), RegistryError> {
        if self.index.contains_key(&surface.id) {
            return Err(RegistryError::DuplicateId(surface.id));
        }

        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize] = Some(surface);
            idx
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a session never tracks anywhere near u32::MAX surfaces"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Some(surface));
            idx
        };

        self.index.insert(surface.id, idx);
        self.order.push(surface.id);
        self.pending_added.push(surface.id);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        Ok(())
    }

    /// Replaces the center and extent of a registered surface.
    ///
    /// The id and kind are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownAnchor`] if `id` is not registered.
    pub fn on_updated(
        &mut self,
        id: SurfaceId,
        center: Vec3,
        extent: Extent,
    ) -> Result<(), RegistryError> {
        let idx = self.slot_of(id)?;
        if let Some(surface) = self.slots[idx as usize].as_mut() {
            surface.center = center;
            surface.extent = extent;
        }
        self.dirty.mark(idx, dirty::GEOMETRY);
        Ok(())
    }

    /// Removes a surface the detection service stopped tracking, returning
    /// its last known state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownAnchor`] if `id` is not registered.
    pub fn on_removed(&mut self, id: SurfaceId) -> Result<DetectedSurface, RegistryError> {
        let idx = self.slot_of(id)?;
        let surface = self.slots[idx as usize]
            .take()
            .ok_or(RegistryError::UnknownAnchor(id))?;

        self.index.remove(&id);
        self.order.retain(|o| *o != id);
        self.free_list.push(idx);

        // Clear pending geometry marks so a recycled slot starts clean.
        self.dirty.remove_key(idx);

        // A surface that never made it out of the current window is reported
        // as neither added nor removed.
        if let Some(pos) = self.pending_added.iter().position(|a| *a == id) {
            self.pending_added.remove(pos);
        } else {
            self.pending_removed.push(id);
        }
        self.dirty.mark(idx, dirty::TOPOLOGY);
        Ok(surface)
    }

    // -- Queries --

    /// Returns a snapshot of every registered surface, in insertion order.
    ///
    /// The snapshot is a copy; it does not follow later notifications.
    #[must_use]
    pub fn list_all(&self) -> Vec<DetectedSurface> {
        self.iter().copied().collect()
    }

    /// Iterates registered surfaces in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DetectedSurface> + '_ {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    /// Returns the ids of registered surfaces, in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[SurfaceId] {
        &self.order
    }

    /// Returns the current state of a surface, if registered.
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&DetectedSurface> {
        let idx = *self.index.get(&id)?;
        self.slots[idx as usize].as_ref()
    }

    /// Returns whether a surface is registered.
    #[must_use]
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the number of registered surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether no surfaces are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // -- Internal helpers --

    fn slot_of(&self, id: SurfaceId) -> Result<u32, RegistryError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(RegistryError::UnknownAnchor(id))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn plane(id: u64, x: f64) -> DetectedSurface {
        DetectedSurface::new(
            SurfaceId(id),
            SurfaceKind::PlaneVertical,
            Vec3::new(x, 0.0, 0.0),
            Extent::new(1.0, 1.0),
        )
    }

    #[test]
    fn detect_and_list() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1, 0.0)).unwrap();
        reg.on_detected(plane(2, 1.0)).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.list_all(), vec![plane(1, 0.0), plane(2, 1.0)]);
    }

    #[test]
    fn duplicate_detection_is_rejected() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1, 0.0)).unwrap();
        let err = reg.on_detected(plane(1, 5.0)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(SurfaceId(1)));
        assert_eq!(reg.get(SurfaceId(1)), Some(&plane(1, 0.0)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn update_preserves_id_and_kind() {
        let mut reg = AnchorRegistry::new();
        let mut image = plane(4, 0.0);
        image.kind = SurfaceKind::RecognizedImage;
        reg.on_detected(image).unwrap();

        reg.on_updated(SurfaceId(4), Vec3::new(1.0, 2.0, 3.0), Extent::new(0.5, 0.25))
            .unwrap();
        let s = reg.get(SurfaceId(4)).unwrap();
        assert_eq!(s.id, SurfaceId(4));
        assert_eq!(s.kind, SurfaceKind::RecognizedImage);
        assert_eq!(s.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.extent, Extent::new(0.5, 0.25));
    }

    #[test]
    fn unknown_update_and_removal_are_rejected() {
        let mut reg = AnchorRegistry::new();
        assert_eq!(
            reg.on_updated(SurfaceId(7), Vec3::ZERO, Extent::default()),
            Err(RegistryError::UnknownAnchor(SurfaceId(7)))
        );
        assert_eq!(
            reg.on_removed(SurfaceId(7)),
            Err(RegistryError::UnknownAnchor(SurfaceId(7)))
        );
    }

    #[test]
    fn remove_returns_last_state_and_keeps_order() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1, 0.0)).unwrap();
        reg.on_detected(plane(2, 1.0)).unwrap();
        reg.on_detected(plane(3, 2.0)).unwrap();

        let removed = reg.on_removed(SurfaceId(2)).unwrap();
        assert_eq!(removed, plane(2, 1.0));
        assert!(!reg.contains(SurfaceId(2)));
        assert_eq!(reg.ids(), &[SurfaceId(1), SurfaceId(3)]);
    }

    #[test]
    fn freed_slot_is_reused_without_disturbing_order() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1, 0.0)).unwrap();
        reg.on_detected(plane(2, 1.0)).unwrap();
        reg.on_removed(SurfaceId(1)).unwrap();
        reg.on_detected(plane(3, 2.0)).unwrap();

        assert_eq!(reg.slots.len(), 2, "slot 0 should be recycled");
        assert_eq!(reg.ids(), &[SurfaceId(2), SurfaceId(3)]);
    }

    #[test]
    fn removing_everything_leaves_empty_registry() {
        let mut reg = AnchorRegistry::new();
        reg.on_detected(plane(1, 0.0)).unwrap();
        reg.on_removed(SurfaceId(1)).unwrap();
        assert!(reg.is_empty());
        assert!(reg.list_all().is_empty());
    }

    /// Replays a scripted notification feed against both the registry and a
    /// plain `Vec` model, checking they agree after every step.
    #[test]
    fn replay_matches_simple_model() {
        enum Op {
            Detect(u64, f64),
            Update(u64, f64, f64),
            Remove(u64),
        }
        let script = [
            Op::Detect(10, 0.0),
            Op::Detect(11, 1.0),
            Op::Update(10, 5.0, 2.0),
            Op::Detect(12, 2.0),
            Op::Remove(11),
            Op::Update(12, -1.0, 0.5),
            Op::Detect(13, 3.0),
            Op::Remove(10),
            Op::Detect(14, 4.0),
            Op::Update(13, 3.5, 3.5),
            Op::Remove(12),
            Op::Remove(13),
            Op::Detect(15, 6.0),
        ];

        let mut reg = AnchorRegistry::new();
        let mut model: Vec<(SurfaceId, Vec3, Extent)> = Vec::new();

        for op in script {
            match op {
                Op::Detect(id, x) => {
                    let s = plane(id, x);
                    reg.on_detected(s).unwrap();
                    model.push((s.id, s.center, s.extent));
                }
                Op::Update(id, x, w) => {
                    let center = Vec3::new(x, 0.0, 0.0);
                    let extent = Extent::new(w, w);
                    reg.on_updated(SurfaceId(id), center, extent).unwrap();
                    let entry = model.iter_mut().find(|m| m.0 == SurfaceId(id)).unwrap();
                    entry.1 = center;
                    entry.2 = extent;
                }
                Op::Remove(id) => {
                    reg.on_removed(SurfaceId(id)).unwrap();
                    model.retain(|m| m.0 != SurfaceId(id));
                }
            }

            let listed: Vec<_> = reg
                .list_all()
                .into_iter()
                .map(|s| (s.id, s.center, s.extent))
                .collect();
            assert_eq!(listed, model, "registry diverged from model");
        }
    }
}
