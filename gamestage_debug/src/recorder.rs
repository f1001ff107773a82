// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! Floats are stored by bit pattern, so decoded occluder panes compare equal
//! to the ones the session produced.

use gamestage_core::error::ErrorClass;
use gamestage_core::geom::Vec3;
use gamestage_core::occluder::{OccluderPane, OccluderSide};
use gamestage_core::selection::Mode;
use gamestage_core::surface::{SurfaceId, SurfaceKind};
use gamestage_core::trace::{
    DiagnosticEvent, GamespaceEvent, SurfaceAction, SurfaceEvent, TapEvent, TraceSink,
    TransitionCause, TransitionEvent,
};
use kurbo::{Point, Size};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SURFACE: u8 = 1;
const TAG_TAP: u8 = 2;
const TAG_TRANSITION: u8 = 3;
const TAG_GAMESPACE: u8 = 4;
const TAG_DIAGNOSTIC: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_surface_id(&mut self, id: Option<SurfaceId>) {
        match id {
            Some(SurfaceId(raw)) => {
                self.write_u8(1);
                self.write_u64(raw);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_mode(&mut self, m: Mode) {
        self.write_u8(match m {
            Mode::Browse => 0,
            Mode::Play => 1,
        });
    }

    fn write_pane(&mut self, p: &OccluderPane) {
        self.write_u8(match p.side {
            OccluderSide::Top => 0,
            OccluderSide::Bottom => 1,
            OccluderSide::Left => 2,
            OccluderSide::Right => 3,
        });
        self.write_f64(p.position.x);
        self.write_f64(p.position.y);
        self.write_f64(p.position.z);
        self.write_f64(p.yaw);
        self.write_f64(p.size.width);
        self.write_f64(p.size.height);
    }
}

impl TraceSink for RecorderSink {
    fn on_surface(&mut self, e: &SurfaceEvent) {
        self.write_u8(TAG_SURFACE);
        self.write_u64(e.seq);
        self.write_u8(match e.action {
            SurfaceAction::Detected => 0,
            SurfaceAction::Updated => 1,
            SurfaceAction::Removed => 2,
        });
        self.write_u64(e.surface.0);
        self.write_u8(match e.kind {
            SurfaceKind::PlaneVertical => 0,
            SurfaceKind::PlaneHorizontal => 1,
            SurfaceKind::RecognizedImage => 2,
        });
    }

    fn on_tap(&mut self, e: &TapEvent) {
        self.write_u8(TAG_TAP);
        self.write_u64(e.seq);
        self.write_f64(e.point.x);
        self.write_f64(e.point.y);
        self.write_u32(e.candidates);
        self.write_surface_id(e.ranked);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_u8(TAG_TRANSITION);
        self.write_u64(e.seq);
        self.write_mode(e.from);
        self.write_mode(e.to);
        self.write_u64(e.anchor.0);
        self.write_u8(match e.cause {
            TransitionCause::Select => 0,
            TransitionCause::Resume => 1,
            TransitionCause::AnchorLost => 2,
        });
    }

    fn on_gamespace(&mut self, e: &GamespaceEvent) {
        self.write_u8(TAG_GAMESPACE);
        self.write_u64(e.seq);
        self.write_u64(e.anchor.0);
        self.write_u8(u8::from(e.regenerated));
        for pane in &e.panes {
            self.write_pane(pane);
        }
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        self.write_u8(TAG_DIAGNOSTIC);
        self.write_u64(e.seq);
        self.write_u8(match e.class {
            ErrorClass::ProtocolViolation => 0,
            ErrorClass::NoHitSelected => 1,
            ErrorClass::InconsistentSelection => 2,
        });
        self.write_surface_id(e.surface);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`SurfaceEvent`].
    Surface(SurfaceEvent),
    /// A [`TapEvent`].
    Tap(TapEvent),
    /// A [`TransitionEvent`].
    Transition(TransitionEvent),
    /// A [`GamespaceEvent`].
    Gamespace(GamespaceEvent),
    /// A [`DiagnosticEvent`].
    Diagnostic(DiagnosticEvent),
}

impl RecordedEvent {
    /// The session sequence number of this event.
    #[must_use]
    pub fn seq(&self) -> u64 {
        match self {
            Self::Surface(e) => e.seq,
            Self::Tap(e) => e.seq,
            Self::Transition(e) => e.seq,
            Self::Gamespace(e) => e.seq,
            Self::Diagnostic(e) => e.seq,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_surface_id(&mut self) -> Option<Option<SurfaceId>> {
        let present = self.read_u8()?;
        let raw = self.read_u64()?;
        Some((present != 0).then_some(SurfaceId(raw)))
    }

    fn read_mode(&mut self) -> Option<Mode> {
        Some(match self.read_u8()? {
            0 => Mode::Browse,
            _ => Mode::Play,
        })
    }

    fn read_pane(&mut self) -> Option<OccluderPane> {
        let side = match self.read_u8()? {
            0 => OccluderSide::Top,
            1 => OccluderSide::Bottom,
            2 => OccluderSide::Left,
            _ => OccluderSide::Right,
        };
        Some(OccluderPane {
            side,
            position: Vec3::new(self.read_f64()?, self.read_f64()?, self.read_f64()?),
            yaw: self.read_f64()?,
            size: Size::new(self.read_f64()?, self.read_f64()?),
        })
    }

    fn decode_surface(&mut self) -> Option<RecordedEvent> {
        let seq = self.read_u64()?;
        let action = match self.read_u8()? {
            0 => SurfaceAction::Detected,
            1 => SurfaceAction::Updated,
            _ => SurfaceAction::Removed,
        };
        let surface = SurfaceId(self.read_u64()?);
        let kind = match self.read_u8()? {
            0 => SurfaceKind::PlaneVertical,
            1 => SurfaceKind::PlaneHorizontal,
            _ => SurfaceKind::RecognizedImage,
        };
        Some(RecordedEvent::Surface(SurfaceEvent {
            seq,
            action,
            surface,
            kind,
        }))
    }

    fn decode_tap(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Tap(TapEvent {
            seq: self.read_u64()?,
            point: Point::new(self.read_f64()?, self.read_f64()?),
            candidates: self.read_u32()?,
            ranked: self.read_surface_id()?,
        }))
    }

    fn decode_transition(&mut self) -> Option<RecordedEvent> {
        let seq = self.read_u64()?;
        let from = self.read_mode()?;
        let to = self.read_mode()?;
        let anchor = SurfaceId(self.read_u64()?);
        let cause = match self.read_u8()? {
            0 => TransitionCause::Select,
            1 => TransitionCause::Resume,
            _ => TransitionCause::AnchorLost,
        };
        Some(RecordedEvent::Transition(TransitionEvent {
            seq,
            from,
            to,
            anchor,
            cause,
        }))
    }

    fn decode_gamespace(&mut self) -> Option<RecordedEvent> {
        let seq = self.read_u64()?;
        let anchor = SurfaceId(self.read_u64()?);
        let regenerated = self.read_u8()? != 0;
        let panes = [
            self.read_pane()?,
            self.read_pane()?,
            self.read_pane()?,
            self.read_pane()?,
        ];
        Some(RecordedEvent::Gamespace(GamespaceEvent {
            seq,
            anchor,
            panes,
            regenerated,
        }))
    }

    fn decode_diagnostic(&mut self) -> Option<RecordedEvent> {
        let seq = self.read_u64()?;
        let class = match self.read_u8()? {
            0 => ErrorClass::ProtocolViolation,
            1 => ErrorClass::NoHitSelected,
            _ => ErrorClass::InconsistentSelection,
        };
        Some(RecordedEvent::Diagnostic(DiagnosticEvent {
            seq,
            class,
            surface: self.read_surface_id()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SURFACE => self.decode_surface(),
            TAG_TAP => self.decode_tap(),
            TAG_TRANSITION => self.decode_transition(),
            TAG_GAMESPACE => self.decode_gamespace(),
            TAG_DIAGNOSTIC => self.decode_diagnostic(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
