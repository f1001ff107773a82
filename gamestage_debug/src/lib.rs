// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for gamestage
//! session diagnostics.
//!
//! This crate provides [`TraceSink`](gamestage_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//!
//! [`Tee`] forwards every event to two sinks, so a session can be printed and
//! recorded in one run.

use gamestage_core::trace::{
    DiagnosticEvent, GamespaceEvent, SurfaceEvent, TapEvent, TraceSink, TransitionEvent,
};

pub mod chrome;
pub mod pretty;
pub mod recorder;

/// A [`TraceSink`] that forwards every event to two sinks, `A` first.
#[derive(Debug, Default)]
pub struct Tee<A, B> {
    /// First sink.
    pub first: A,
    /// Second sink.
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Pairs two sinks.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_surface(&mut self, e: &SurfaceEvent) {
        self.first.on_surface(e);
        self.second.on_surface(e);
    }

    fn on_tap(&mut self, e: &TapEvent) {
        self.first.on_tap(e);
        self.second.on_tap(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.first.on_transition(e);
        self.second.on_transition(e);
    }

    fn on_gamespace(&mut self, e: &GamespaceEvent) {
        self.first.on_gamespace(e);
        self.second.on_gamespace(e);
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        self.first.on_diagnostic(e);
        self.second.on_diagnostic(e);
    }
}

#[cfg(test)]
mod tests {
    use gamestage_core::surface::{SurfaceId, SurfaceKind};
    use gamestage_core::trace::SurfaceAction;

    use super::*;
    use crate::pretty::PrettyPrintSink;
    use crate::recorder::{RecorderSink, decode};

    #[test]
    fn tee_feeds_both_sinks() {
        let mut tee = Tee::new(
            PrettyPrintSink::with_writer(Vec::<u8>::new()),
            RecorderSink::new(),
        );
        tee.on_surface(&SurfaceEvent {
            seq: 0,
            action: SurfaceAction::Removed,
            surface: SurfaceId(2),
            kind: SurfaceKind::RecognizedImage,
        });

        assert_eq!(decode(tee.second.as_bytes()).count(), 1);
        let text = String::from_utf8(tee.first.into_inner()).unwrap();
        assert!(text.contains("removed #2"), "got: {text}");
    }
}
