// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted AR session that exercises selection, occluder generation, and the
//! diagnostics pipeline.
//!
//! A simulated tracking thread reports surfaces through an event channel. A
//! loopback detection service confirms every removal request by posting the
//! matching removal back into the same channel. Events are traced to both a
//! [`PrettyPrintSink`] and a [`RecorderSink`], then exported as a Chrome trace
//! JSON file.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufWriter;
use std::thread;

use kurbo::Point;

use gamestage_core::backend::{DetectionService, Presenter, Prober};
use gamestage_core::config::SessionConfig;
use gamestage_core::event::{self, Event, EventQueue, EventReceiver, EventSender};
use gamestage_core::geom::{Extent, Vec3};
use gamestage_core::occluder::OccluderPane;
use gamestage_core::rank::HitCandidate;
use gamestage_core::session::Session;
use gamestage_core::surface::{DetectedSurface, SurfaceId, SurfaceKind, SurfaceKinds};
use gamestage_core::trace::Tracer;

use gamestage_debug::Tee;
use gamestage_debug::pretty::PrettyPrintSink;
use gamestage_debug::recorder::RecorderSink;

// -- collaborators -----------------------------------------------------------

/// Detection service that answers every removal request with a removal
/// notification.
#[derive(Debug)]
struct LoopbackDetection {
    events: EventSender,
    paused: bool,
}

impl DetectionService for LoopbackDetection {
    fn configure(&mut self, kinds: SurfaceKinds) {
        println!("  detection: configure {kinds:?}");
    }

    fn pause(&mut self) {
        self.paused = true;
        println!("  detection: pause");
    }

    fn resume(&mut self, kinds: SurfaceKinds) {
        self.paused = false;
        println!("  detection: resume {kinds:?}");
    }

    fn request_remove(&mut self, id: SurfaceId) {
        println!("  detection: remove {id}");
        let _ = self.events.send(Event::Removed(id));
    }
}

/// Presenter that narrates what a renderer would do.
#[derive(Debug, Default)]
struct ConsolePresenter {
    occluders: usize,
}

impl Presenter for ConsolePresenter {
    fn attach_indicator(&mut self, surface: &DetectedSurface) {
        println!(
            "  present: indicator on {} ({:.2} x {:.2} m)",
            surface.id, surface.extent.width, surface.extent.depth
        );
    }

    fn update_indicator(&mut self, surface: &DetectedSurface) {
        println!("  present: move indicator {} to {:?}", surface.id, surface.center);
    }

    fn detach_indicator(&mut self, id: SurfaceId) {
        println!("  present: drop indicator {id}");
    }

    fn spawn_content(&mut self, anchor: SurfaceId, center: Vec3) {
        println!("  present: content on {anchor} at {center:?}");
    }

    fn spawn_occluder(&mut self, anchor: SurfaceId, pane: &OccluderPane) {
        self.occluders += 1;
        println!(
            "  present: {:?} occluder on {anchor} at {:?} yaw {:.3}",
            pane.side, pane.position, pane.yaw
        );
    }

    fn despawn_all(&mut self, anchor: SurfaceId) {
        println!("  present: clear gamespace on {anchor}");
    }
}

/// Returns pre-scripted hit lists, one per probe.
#[derive(Debug, Default)]
struct ScriptedProber {
    rounds: VecDeque<Vec<HitCandidate>>,
}

impl Prober for ScriptedProber {
    fn probe(&mut self, _point: Point) -> Vec<HitCandidate> {
        self.rounds.pop_front().unwrap_or_default()
    }
}

// -- script ------------------------------------------------------------------

fn wall(id: u64, center: Vec3, width: f64, depth: f64) -> DetectedSurface {
    DetectedSurface::new(
        SurfaceId(id),
        SurfaceKind::PlaneVertical,
        center,
        Extent::new(width, depth),
    )
}

/// Moves everything posted so far into the queue and processes it, repeating
/// until loopback removals settle.
fn settle(
    session: &mut Session<LoopbackDetection, ConsolePresenter>,
    rx: &EventReceiver,
    queue: &mut EventQueue,
    prober: &mut ScriptedProber,
    tracer: &mut Tracer<'_>,
) {
    while rx.pump_into(queue) > 0 {
        let report = session.drain(queue, prober, tracer);
        for err in &report.failures {
            eprintln!("rejected: {err}");
        }
    }
}

fn main() -> std::io::Result<()> {
    // -- sinks -------------------------------------------------------------
    let mut sink = Tee::new(
        PrettyPrintSink::new(Box::new(std::io::stdout())),
        RecorderSink::new(),
    );

    // -- session -----------------------------------------------------------
    let (tx, rx) = event::channel();
    let detection = LoopbackDetection {
        events: tx.clone(),
        paused: false,
    };
    let mut session = Session::new(
        SessionConfig::vertical_planes(),
        detection,
        ConsolePresenter::default(),
    );
    let mut prober = ScriptedProber::default();
    let mut queue = EventQueue::new();

    println!("== start");
    session.start();

    {
        let mut tracer = Tracer::new(&mut sink);

        println!("== tracking thread reports three walls");
        let tracking = {
            let tx = tx.clone();
            thread::spawn(move || {
                let _ = tx.send(Event::Detected(wall(1, Vec3::new(-0.8, 0.0, -2.0), 1.0, 2.0)));
                let _ = tx.send(Event::Detected(wall(2, Vec3::new(0.6, 0.1, -1.5), 1.2, 1.6)));
                let _ = tx.send(Event::Detected(wall(3, Vec3::new(2.0, 0.0, -3.0), 0.8, 0.8)));
                let _ = tx.send(Event::Updated {
                    id: SurfaceId(2),
                    center: Vec3::new(0.6, 0.1, -1.4),
                    extent: Extent::new(1.4, 1.8),
                });
            })
        };
        if tracking.join().is_err() {
            eprintln!("tracking thread panicked");
        }
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);

        println!("== tap on empty space");
        prober.rounds.push_back(Vec::new());
        let _ = tx.send(Event::Tap(Point::new(40.0, 700.0)));
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);

        println!("== tap through two walls");
        prober.rounds.push_back(vec![
            HitCandidate::new(SurfaceId(1), 2.1),
            HitCandidate::new(SurfaceId(2), 1.6),
        ]);
        let _ = tx.send(Event::Tap(Point::new(200.0, 400.0)));
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);

        println!("== committed wall is refined");
        let _ = tx.send(Event::Updated {
            id: SurfaceId(2),
            center: Vec3::new(0.65, 0.1, -1.4),
            extent: Extent::new(1.5, 1.8),
        });
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);

        println!("== late detection while playing");
        let _ = tx.send(Event::Detected(wall(4, Vec3::new(-2.0, 0.0, -1.0), 0.5, 0.5)));
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);

        println!("== tap to go back to browsing");
        let _ = tx.send(Event::Tap(Point::new(200.0, 400.0)));
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);

        println!("== a new wall, selected, then lost");
        let _ = tx.send(Event::Detected(wall(5, Vec3::new(0.0, 0.0, -2.5), 2.0, 1.0)));
        prober
            .rounds
            .push_back(vec![HitCandidate::new(SurfaceId(5), 2.5)]);
        let _ = tx.send(Event::Tap(Point::new(180.0, 380.0)));
        let _ = tx.send(Event::Removed(SurfaceId(5)));
        settle(&mut session, &rx, &mut queue, &mut prober, &mut tracer);
    }

    println!(
        "== done: mode {:?}, {} registered, {} occluders spawned, detection paused: {}",
        session.mode(),
        session.registry().len(),
        session.presenter().occluders,
        session.detection().paused,
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    gamestage_debug::chrome::export(sink.second.as_bytes(), &mut writer)?;

    println!("Wrote {path}");
    Ok(())
}
