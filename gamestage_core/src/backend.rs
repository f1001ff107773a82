// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts for platform integrations.
//!
//! The core never talks to a tracking SDK or a renderer directly. A host
//! integration provides three pieces:
//!
//! - **Detection service**: Implements [`DetectionService`] so the session
//!   can choose what to detect, pause detection during play, and ask for
//!   surfaces to be dropped. Its notifications flow the other way, into
//!   [`Session::on_detected`] and friends (or through an
//!   [`EventQueue`](crate::event::EventQueue)).
//!
//! - **Prober**: Implements [`Prober`] to cast a ray or cone from a screen
//!   point into tracked geometry.
//!
//! - **Presenter**: Implements [`Presenter`] to show indicators while
//!   browsing and gamespace content while playing.
//!
//! Every call the core makes through these traits is fire-and-forget: it does
//! not wait for, or depend on, the collaborator acting on it. In particular a
//! [`request_remove`](DetectionService::request_remove) only takes effect in
//! the registry once the service confirms with a removal notification.
//!
//! # Event loop pseudocode
//!
//! ```rust,ignore
//! fn on_host_callback(event: Event) {
//!     queue.push(event);
//! }
//!
//! fn on_main_thread_turn() {
//!     let mut tracer = Tracer::new(&mut sink);
//!     let report = session.drain(&mut queue, &mut prober, &mut tracer);
//!     for err in &report.failures {
//!         log_rejected(err);
//!     }
//! }
//! ```
//!
//! [`Session::on_detected`]: crate::session::Session::on_detected

use alloc::vec::Vec;

use kurbo::Point;

use crate::geom::Vec3;
use crate::occluder::OccluderPane;
use crate::rank::HitCandidate;
use crate::surface::{DetectedSurface, SurfaceId, SurfaceKinds};

/// The device's surface detection service, as seen from the core.
pub trait DetectionService {
    /// Sets which surface kinds to detect, starting detection.
    fn configure(&mut self, kinds: SurfaceKinds);

    /// Stops detecting new surfaces. Existing surfaces stay tracked.
    fn pause(&mut self);

    /// Restarts detection with the given kinds.
    fn resume(&mut self, kinds: SurfaceKinds);

    /// Asks the service to stop tracking a surface.
    ///
    /// The service confirms with a removal notification; until then the
    /// surface stays registered.
    fn request_remove(&mut self, id: SurfaceId);
}

/// Hit-testing against tracked surfaces.
pub trait Prober {
    /// Returns every tracked surface intersected by a probe cast from
    /// `point`, in any order.
    fn probe(&mut self, point: Point) -> Vec<HitCandidate>;
}

/// The rendering collaborator.
///
/// Indicator calls happen only in Browse mode; content and occluder calls
/// only for the committed surface in Play mode.
pub trait Presenter {
    /// Shows a candidate marker and extent outline for a surface.
    fn attach_indicator(&mut self, surface: &DetectedSurface);

    /// Moves or resizes an attached indicator.
    fn update_indicator(&mut self, surface: &DetectedSurface);

    /// Removes the indicator for a surface.
    fn detach_indicator(&mut self, id: SurfaceId);

    /// Places gamespace content on the committed surface.
    fn spawn_content(&mut self, anchor: SurfaceId, center: Vec3);

    /// Adds one occluder pane to the committed surface.
    fn spawn_occluder(&mut self, anchor: SurfaceId, pane: &OccluderPane);

    /// Removes all content and occluders attached to `anchor`.
    fn despawn_all(&mut self, anchor: SurfaceId);
}
