// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::fmt::Write as _;
use std::io::Write;

use gamestage_core::occluder::OccluderSide;
use gamestage_core::surface::SurfaceId;
use gamestage_core::trace::{
    DiagnosticEvent, GamespaceEvent, SurfaceAction, SurfaceEvent, TapEvent, TraceSink,
    TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn action_name(action: SurfaceAction) -> &'static str {
    match action {
        SurfaceAction::Detected => "detected",
        SurfaceAction::Updated => "updated",
        SurfaceAction::Removed => "removed",
    }
}

fn side_name(side: OccluderSide) -> &'static str {
    match side {
        OccluderSide::Top => "top",
        OccluderSide::Bottom => "bottom",
        OccluderSide::Left => "left",
        OccluderSide::Right => "right",
    }
}

fn surface_or_none(id: Option<SurfaceId>) -> String {
    id.map_or_else(|| String::from("none"), |id| id.to_string())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_surface(&mut self, e: &SurfaceEvent) {
        let _ = writeln!(
            self.writer,
            "[surface] seq={} {} {} kind={:?}",
            e.seq,
            action_name(e.action),
            e.surface,
            e.kind,
        );
    }

    fn on_tap(&mut self, e: &TapEvent) {
        let _ = writeln!(
            self.writer,
            "[tap] seq={} at ({:.1}, {:.1}) hits={} ranked={}",
            e.seq,
            e.point.x,
            e.point.y,
            e.candidates,
            surface_or_none(e.ranked),
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] seq={} {:?} -> {:?} anchor={} cause={:?}",
            e.seq, e.from, e.to, e.anchor, e.cause,
        );
    }

    fn on_gamespace(&mut self, e: &GamespaceEvent) {
        let mut panes = String::new();
        for pane in &e.panes {
            let _ = write!(
                panes,
                " {}@({:.2}, {:.2}, {:.2})",
                side_name(pane.side),
                pane.position.x,
                pane.position.y,
                pane.position.z,
            );
        }
        let verb = if e.regenerated { "regenerated" } else { "spawned" };
        let _ = writeln!(
            self.writer,
            "[gamespace] seq={} {verb} anchor={}{panes}",
            e.seq, e.anchor,
        );
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        let _ = writeln!(
            self.writer,
            "[diagnostic] seq={} class={:?} surface={}",
            e.seq,
            e.class,
            surface_or_none(e.surface),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamestage_core::error::ErrorClass;
    use gamestage_core::geom::{Extent, Vec3};
    use gamestage_core::occluder;
    use kurbo::Point;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_tap() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tap(&TapEvent {
            seq: 4,
            point: Point::new(10.0, 20.5),
            candidates: 0,
            ranked: None,
        });
        let output = output(sink);
        assert!(output.contains("[tap]"), "got: {output}");
        assert!(output.contains("seq=4"), "got: {output}");
        assert!(output.contains("ranked=none"), "got: {output}");
    }

    #[test]
    fn pretty_print_gamespace_lists_every_side() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_gamespace(&GamespaceEvent {
            seq: 2,
            anchor: SurfaceId(7),
            panes: occluder::generate(Vec3::ZERO, Extent::new(2.0, 4.0), 3.0),
            regenerated: true,
        });
        let output = output(sink);
        assert!(output.contains("regenerated anchor=#7"), "got: {output}");
        assert!(output.contains("top@(0.00, -1.50, -2.00)"), "got: {output}");
        assert!(output.contains("right@(1.00, -1.50, 0.00)"), "got: {output}");
        assert_eq!(output.lines().count(), 1, "one line per event");
    }

    #[test]
    fn pretty_print_diagnostic() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_diagnostic(&DiagnosticEvent {
            seq: 9,
            class: ErrorClass::ProtocolViolation,
            surface: Some(SurfaceId(3)),
        });
        let output = output(sink);
        assert!(
            output.contains("class=ProtocolViolation surface=#3"),
            "got: {output}"
        );
    }
}
