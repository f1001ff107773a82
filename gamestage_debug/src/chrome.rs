// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Sessions have no clock, so each event's sequence number is used as its
//! timestamp in microseconds. Time in Play mode shows up as a `Play` span;
//! everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use gamestage_core::selection::Mode;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Surface(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.action),
                    "cat": "Registry",
                    "ts": e.seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "surface": e.surface.0,
                        "kind": format!("{:?}", e.kind),
                    }
                }));
            }
            RecordedEvent::Tap(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Tap",
                    "cat": "Input",
                    "ts": e.seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "x": e.point.x,
                        "y": e.point.y,
                        "candidates": e.candidates,
                        "ranked": e.ranked.map(|id| id.0),
                    }
                }));
            }
            RecordedEvent::Transition(e) => {
                let ph = match e.to {
                    Mode::Play => "B",
                    Mode::Browse => "E",
                };
                events.push(json!({
                    "ph": ph,
                    "name": "Play",
                    "cat": "Selection",
                    "ts": e.seq,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "anchor": e.anchor.0,
                        "cause": format!("{:?}", e.cause),
                    }
                }));
            }
            RecordedEvent::Gamespace(e) => {
                let panes: Vec<Value> = e
                    .panes
                    .iter()
                    .map(|p| {
                        json!({
                            "side": format!("{:?}", p.side),
                            "position": [p.position.x, p.position.y, p.position.z],
                            "yaw": p.yaw,
                            "size": [p.size.width, p.size.height],
                        })
                    })
                    .collect();
                events.push(json!({
                    "ph": "i",
                    "name": if e.regenerated { "Regenerate" } else { "Spawn" },
                    "cat": "Gamespace",
                    "ts": e.seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "anchor": e.anchor.0,
                        "panes": panes,
                    }
                }));
            }
            RecordedEvent::Diagnostic(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.class),
                    "cat": "Diagnostic",
                    "ts": e.seq,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "surface": e.surface.map(|id| id.0),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
