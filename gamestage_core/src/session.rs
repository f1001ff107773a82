// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinating component.
//!
//! A [`Session`] owns the [`AnchorRegistry`] and the [`SelectionState`] and is
//! the only thing that mutates either. It applies detection notifications,
//! turns taps into selections, and sequences the side effects of every
//! Browse ⇄ Play transition through the [`DetectionService`] and
//! [`Presenter`] collaborators.
//!
//! # Processing model
//!
//! Every operation runs to completion synchronously. After each notification
//! the session evaluates the registry and forwards the resulting
//! [`SurfaceChanges`] to the presenter, so indicators and the gamespace never
//! lag the registry by more than one call.
//!
//! # Failures
//!
//! Operations return [`SessionError`] but never leave the session in a
//! half-applied state: a failed operation changes nothing. Each failure is
//! also reported as a [`DiagnosticEvent`] through the [`Tracer`].
//! [`handle`](Session::handle) returns the error of the event it dispatched;
//! [`drain`](Session::drain) keeps going and collects every failure in its
//! [`DrainReport`].

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::Point;

use crate::backend::{DetectionService, Presenter, Prober};
use crate::config::SessionConfig;
use crate::error::{SelectionError, SessionError};
use crate::event::{Event, EventQueue};
use crate::geom::{Extent, Vec3};
use crate::occluder;
use crate::rank::rank;
use crate::selection::{Mode, SelectionState};
use crate::surface::{AnchorRegistry, DetectedSurface, SurfaceChanges, SurfaceId};
use crate::trace::{
    DiagnosticEvent, GamespaceEvent, SurfaceAction, SurfaceEvent, TapEvent, TransitionCause,
    TransitionEvent, Tracer,
};

/// Outcome of one [`Session::drain`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct DrainReport {
    /// Number of events popped from the queue.
    pub handled: usize,
    /// Errors of the events that failed, in arrival order.
    pub failures: Vec<SessionError>,
}

impl DrainReport {
    /// Returns `true` if every drained event succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Anchor tracking and selection for one AR session.
#[derive(Debug)]
pub struct Session<D, P> {
    config: SessionConfig,
    registry: AnchorRegistry,
    state: SelectionState,
    detection: D,
    presenter: P,
    /// Surfaces with an attached indicator.
    indicators: HashSet<SurfaceId>,
    /// Surfaces we asked the detection service to drop and that have not been
    /// removed yet. They are out of consideration for selection.
    pending_removal: HashSet<SurfaceId>,
    changes: SurfaceChanges,
    seq: u64,
}

impl<D: DetectionService, P: Presenter> Session<D, P> {
    /// Creates a session in Browse mode with an empty registry.
    ///
    /// Call [`start`](Self::start) to begin detection.
    pub fn new(config: SessionConfig, detection: D, presenter: P) -> Self {
        Self {
            config,
            registry: AnchorRegistry::new(),
            state: SelectionState::Browse,
            detection,
            presenter,
            indicators: HashSet::new(),
            pending_removal: HashSet::new(),
            changes: SurfaceChanges::default(),
            seq: 0,
        }
    }

    /// Starts detection with the configured browse kinds.
    pub fn start(&mut self) {
        self.detection.configure(self.config.browse_kinds);
    }

    // -- Accessors --

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    /// Returns the selection state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Returns the committed surface, if in Play.
    #[must_use]
    pub fn committed(&self) -> Option<&DetectedSurface> {
        self.registry.get(self.state.committed()?)
    }

    /// Returns whether `id` currently has an indicator attached.
    #[must_use]
    pub fn has_indicator(&self, id: SurfaceId) -> bool {
        self.indicators.contains(&id)
    }

    /// Returns the detection collaborator.
    #[must_use]
    pub fn detection(&self) -> &D {
        &self.detection
    }

    /// Returns the rendering collaborator.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns the rendering collaborator mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // -- Detection notifications --

    /// Applies a `detected` notification.
    ///
    /// In Browse the surface gets an indicator. In Play it is a late
    /// detection that raced the pause, and is immediately sent back for
    /// removal.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateId`](crate::error::RegistryError::DuplicateId)
    /// if the id is already registered.
    pub fn on_detected(
        &mut self,
        surface: DetectedSurface,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        let result = self.apply_detected(surface, tracer);
        self.report(result, tracer)
    }

    /// Applies an `updated` notification.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownAnchor`](crate::error::RegistryError::UnknownAnchor)
    /// if the id is not registered.
    pub fn on_updated(
        &mut self,
        id: SurfaceId,
        center: Vec3,
        extent: Extent,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        let result = self.apply_updated(id, center, extent, tracer);
        self.report(result, tracer)
    }

    /// Applies a `removed` notification.
    ///
    /// Losing the committed surface returns the session to Browse.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownAnchor`](crate::error::RegistryError::UnknownAnchor)
    /// if the id is not registered.
    pub fn on_removed(
        &mut self,
        id: SurfaceId,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        let result = self.apply_removed(id, tracer);
        self.report(result, tracer)
    }

    // -- Input --

    /// Handles a tap.
    ///
    /// In Play a tap returns to Browse. In Browse the tap is probed, the hits
    /// ranked, and the winner selected.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub fn on_tap(
        &mut self,
        point: Point,
        prober: &mut dyn Prober,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        if self.state.mode() == Mode::Play {
            self.resume(tracer);
            return Ok(());
        }

        let candidates = prober.probe(point);
        let ranked = rank(&candidates);
        let seq = self.next_seq();
        tracer.tap(&TapEvent {
            seq,
            point,
            candidates: u32::try_from(candidates.len()).unwrap_or(u32::MAX),
            ranked,
        });

        let result = self.apply_select(ranked, tracer);
        self.report(result, tracer)
    }

    /// Commits the ranked surface and enters Play.
    ///
    /// Every other registered surface is sent back to the detection service
    /// for removal, detection is paused, and content plus four occluders are
    /// spawned from the committed surface's current geometry.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::NoHitSelected`] if `ranked` is `None`, or names a
    ///   surface that is not registered or is already being removed.
    /// - [`SelectionError::InconsistentSelection`] if a surface is already
    ///   committed.
    pub fn select(
        &mut self,
        ranked: Option<SurfaceId>,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        let result = self.apply_select(ranked, tracer);
        self.report(result, tracer)
    }

    /// Leaves Play and returns to Browse.
    ///
    /// Detection resumes, the gamespace is removed, and the committed surface
    /// is sent back to the detection service. No-op in Browse.
    pub fn resume(&mut self, tracer: &mut Tracer<'_>) {
        let Some(anchor) = self.state.committed() else {
            return;
        };

        self.detection.resume(self.config.browse_kinds);
        self.presenter.despawn_all(anchor);
        self.discard(anchor);
        self.state.release();

        let seq = self.next_seq();
        tracer.transition(&TransitionEvent {
            seq,
            from: Mode::Play,
            to: Mode::Browse,
            anchor,
            cause: TransitionCause::Resume,
        });

        self.show_all_indicators();
    }

    // -- Event loop --

    /// Dispatches one event to the matching operation.
    pub fn handle(
        &mut self,
        event: Event,
        prober: &mut dyn Prober,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        match event {
            Event::Detected(surface) => self.on_detected(surface, tracer),
            Event::Updated { id, center, extent } => self.on_updated(id, center, extent, tracer),
            Event::Removed(id) => self.on_removed(id, tracer),
            Event::Tap(point) => self.on_tap(point, prober, tracer),
        }
    }

    /// Processes every queued event in order.
    ///
    /// A failed event does not stop the drain; its error is collected in the
    /// returned report in arrival order.
    pub fn drain(
        &mut self,
        queue: &mut EventQueue,
        prober: &mut dyn Prober,
        tracer: &mut Tracer<'_>,
    ) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(event) = queue.pop() {
            if let Err(err) = self.handle(event, prober, tracer) {
                report.failures.push(err);
            }
            report.handled += 1;
        }
        report
    }

    // -- Transitions --

    fn apply_detected(
        &mut self,
        surface: DetectedSurface,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        self.registry.on_detected(surface)?;
        let seq = self.next_seq();
        tracer.surface(&SurfaceEvent {
            seq,
            action: SurfaceAction::Detected,
            surface: surface.id,
            kind: surface.kind,
        });
        self.flush(tracer);
        Ok(())
    }

    fn apply_updated(
        &mut self,
        id: SurfaceId,
        center: Vec3,
        extent: Extent,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        self.registry.on_updated(id, center, extent)?;
        if let Some(kind) = self.registry.get(id).map(|s| s.kind) {
            let seq = self.next_seq();
            tracer.surface(&SurfaceEvent {
                seq,
                action: SurfaceAction::Updated,
                surface: id,
                kind,
            });
        }
        self.flush(tracer);
        Ok(())
    }

    fn apply_removed(&mut self, id: SurfaceId, tracer: &mut Tracer<'_>) -> Result<(), SessionError> {
        let surface = self.registry.on_removed(id)?;
        let seq = self.next_seq();
        tracer.surface(&SurfaceEvent {
            seq,
            action: SurfaceAction::Removed,
            surface: id,
            kind: surface.kind,
        });

        if self.state.is_committed(id) {
            self.anchor_lost(id, tracer);
        }
        self.flush(tracer);
        Ok(())
    }

    fn apply_select(
        &mut self,
        ranked: Option<SurfaceId>,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SessionError> {
        let id = ranked.ok_or(SelectionError::NoHitSelected)?;
        if self.state.mode() == Mode::Browse && !self.is_selectable(id) {
            return Err(SelectionError::NoHitSelected.into());
        }
        self.state.commit(id)?;

        let others: Vec<SurfaceId> = self
            .registry
            .ids()
            .iter()
            .copied()
            .filter(|other| *other != id)
            .collect();
        for other in others {
            self.discard(other);
        }
        if self.indicators.remove(&id) {
            self.presenter.detach_indicator(id);
        }
        self.detection.pause();

        let seq = self.next_seq();
        tracer.transition(&TransitionEvent {
            seq,
            from: Mode::Browse,
            to: Mode::Play,
            anchor: id,
            cause: TransitionCause::Select,
        });

        self.spawn_gamespace(id, false, tracer);
        Ok(())
    }

    /// The committed surface is already gone, so unlike
    /// [`resume`](Self::resume) there is nothing to send back.
    fn anchor_lost(&mut self, id: SurfaceId, tracer: &mut Tracer<'_>) {
        if !self.state.is_committed(id) {
            return;
        }

        self.detection.resume(self.config.browse_kinds);
        self.presenter.despawn_all(id);
        self.state.release();

        let seq = self.next_seq();
        tracer.transition(&TransitionEvent {
            seq,
            from: Mode::Play,
            to: Mode::Browse,
            anchor: id,
            cause: TransitionCause::AnchorLost,
        });

        self.show_all_indicators();
    }

    // -- Presentation --

    /// Forwards registry changes to the presenter.
    fn flush(&mut self, tracer: &mut Tracer<'_>) {
        let mut changes = core::mem::take(&mut self.changes);
        self.registry.evaluate_into(&mut changes);

        if changes.topology_changed {
            for &id in &changes.removed {
                self.pending_removal.remove(&id);
                if self.indicators.remove(&id) {
                    self.presenter.detach_indicator(id);
                }
            }

            for &id in &changes.added {
                match self.state {
                    SelectionState::Browse => self.show_indicator(id),
                    SelectionState::Play { .. } => self.discard(id),
                }
            }
        }

        for &id in &changes.updated {
            if self.state.is_committed(id) {
                self.presenter.despawn_all(id);
                self.spawn_gamespace(id, true, tracer);
            } else if self.indicators.contains(&id) {
                if let Some(surface) = self.registry.get(id) {
                    self.presenter.update_indicator(surface);
                }
            }
        }

        self.changes = changes;
    }

    fn spawn_gamespace(&mut self, anchor: SurfaceId, regenerated: bool, tracer: &mut Tracer<'_>) {
        let Some(surface) = self.registry.get(anchor).copied() else {
            return;
        };

        self.presenter.spawn_content(anchor, surface.center);
        let panes = occluder::generate(
            surface.center,
            surface.extent,
            self.config.gamespace_depth,
        );
        for pane in &panes {
            self.presenter.spawn_occluder(anchor, pane);
        }

        let seq = self.next_seq();
        tracer.gamespace(&GamespaceEvent {
            seq,
            anchor,
            panes,
            regenerated,
        });
    }

    fn show_indicator(&mut self, id: SurfaceId) {
        if self.indicators.contains(&id) || self.pending_removal.contains(&id) {
            return;
        }
        if let Some(surface) = self.registry.get(id) {
            self.presenter.attach_indicator(surface);
            self.indicators.insert(id);
        }
    }

    fn show_all_indicators(&mut self) {
        let ids = self.registry.ids().to_vec();
        for id in ids {
            self.show_indicator(id);
        }
    }

    /// Takes a surface out of consideration and asks the detection service to
    /// drop it. Requests are issued at most once per surface.
    fn discard(&mut self, id: SurfaceId) {
        if self.indicators.remove(&id) {
            self.presenter.detach_indicator(id);
        }
        if self.pending_removal.insert(id) {
            self.detection.request_remove(id);
        }
    }

    fn is_selectable(&self, id: SurfaceId) -> bool {
        self.registry.contains(id) && !self.pending_removal.contains(&id)
    }

    // -- Diagnostics --

    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn report<T>(
        &mut self,
        result: Result<T, SessionError>,
        tracer: &mut Tracer<'_>,
    ) -> Result<T, SessionError> {
        if let Err(e) = &result {
            let seq = self.next_seq();
            tracer.diagnostic(&DiagnosticEvent {
                seq,
                class: e.class(),
                surface: e.surface(),
            });
        }
        result
    }
}
