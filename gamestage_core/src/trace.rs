// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the session.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Session`](crate::session::Session) calls as it processes notifications
//! and taps. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Every event carries a `seq` number assigned by the session. Sequence
//! numbers increase by one per emitted event and give sinks a total order
//! without needing a clock.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::ErrorClass;
use crate::occluder::OccluderPane;
use crate::selection::Mode;
use crate::surface::{SurfaceId, SurfaceKind};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which detection-service notification was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceAction {
    /// A new surface was registered.
    Detected,
    /// A registered surface's geometry changed.
    Updated,
    /// A surface was removed from the registry.
    Removed,
}

/// Why the session changed mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionCause {
    /// A tap selected a surface.
    Select,
    /// The user asked to go back to browsing.
    Resume,
    /// The detection service dropped the committed surface.
    AnchorLost,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a detection-service notification was applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceEvent {
    /// Event sequence number.
    pub seq: u64,
    /// What happened.
    pub action: SurfaceAction,
    /// Which surface.
    pub surface: SurfaceId,
    /// The surface's kind.
    pub kind: SurfaceKind,
}

/// Emitted when a tap in Browse mode has been probed and ranked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    /// Event sequence number.
    pub seq: u64,
    /// Screen-space tap location.
    pub point: kurbo::Point,
    /// How many surfaces the probe intersected.
    pub candidates: u32,
    /// The ranked winner, if any.
    pub ranked: Option<SurfaceId>,
}

/// Emitted when the session switches between Browse and Play.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEvent {
    /// Event sequence number.
    pub seq: u64,
    /// Mode before the transition.
    pub from: Mode,
    /// Mode after the transition.
    pub to: Mode,
    /// The surface committed (entering Play) or released (leaving Play).
    pub anchor: SurfaceId,
    /// What triggered the transition.
    pub cause: TransitionCause,
}

/// Emitted after gamespace content and occluders were spawned on a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GamespaceEvent {
    /// Event sequence number.
    pub seq: u64,
    /// The committed surface.
    pub anchor: SurfaceId,
    /// The panes that were spawned, in generation order.
    pub panes: [OccluderPane; 4],
    /// Whether this replaced an earlier gamespace after a geometry update.
    pub regenerated: bool,
}

/// Emitted when an operation failed and was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Event sequence number.
    pub seq: u64,
    /// What kind of failure.
    pub class: ErrorClass,
    /// The surface involved, if any.
    pub surface: Option<SurfaceId>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the session.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a detection-service notification was applied.
    fn on_surface(&mut self, e: &SurfaceEvent) {
        _ = e;
    }

    /// Called after a Browse-mode tap was probed and ranked.
    fn on_tap(&mut self, e: &TapEvent) {
        _ = e;
    }

    /// Called on every Browse ⇄ Play transition.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called after a gamespace was spawned or regenerated.
    fn on_gamespace(&mut self, e: &GamespaceEvent) {
        _ = e;
    }

    /// Called when an operation failed and was dropped.
    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SurfaceEvent`].
    #[inline]
    pub fn surface(&mut self, e: &SurfaceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_surface(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TapEvent`].
    #[inline]
    pub fn tap(&mut self, e: &TapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GamespaceEvent`].
    #[inline]
    pub fn gamespace(&mut self, e: &GamespaceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_gamespace(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DiagnosticEvent`].
    #[inline]
    pub fn diagnostic(&mut self, e: &DiagnosticEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_diagnostic(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_surface() -> SurfaceEvent {
        SurfaceEvent {
            seq: 3,
            action: SurfaceAction::Detected,
            surface: SurfaceId(42),
            kind: SurfaceKind::PlaneVertical,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_surface(&sample_surface());
        sink.on_diagnostic(&DiagnosticEvent {
            seq: 0,
            class: ErrorClass::NoHitSelected,
            surface: None,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.surface(&sample_surface());
        tracer.tap(&TapEvent {
            seq: 1,
            point: kurbo::Point::new(10.0, 20.0),
            candidates: 0,
            ranked: None,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            seen: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_surface(&mut self, e: &SurfaceEvent) {
                self.seen.push(e.seq);
            }
        }

        let mut sink = RecordingSink { seen: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.surface(&sample_surface());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.seen, &[3]);
    }
}
