// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialized event delivery.
//!
//! Detection notifications and taps can originate from different host
//! callbacks, possibly on different threads. The registry and selection
//! state must only be mutated from one place, so both kinds of input are
//! funneled through a single FIFO and processed by
//! [`Session::drain`](crate::session::Session::drain) in arrival order. A tap
//! queued behind a notification therefore always ranks against a registry
//! that already reflects it.
//!
//! With the `std` feature, [`channel`] returns a `Send` producer handle for
//! callbacks running off the session thread.

use alloc::collections::VecDeque;

use kurbo::Point;

use crate::geom::{Extent, Vec3};
use crate::surface::{DetectedSurface, SurfaceId};

/// One input to the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The detection service found a new surface.
    Detected(DetectedSurface),
    /// The detection service refined a surface's geometry.
    Updated {
        /// Which surface.
        id: SurfaceId,
        /// New center.
        center: Vec3,
        /// New extent.
        extent: Extent,
    },
    /// The detection service stopped tracking a surface.
    Removed(SurfaceId),
    /// The user tapped the screen.
    Tap(Point),
}

/// Unbounded FIFO of [`Event`]s owned by the session thread.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    items: VecDeque<Event>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.items.push_back(event);
    }

    /// Removes the oldest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.items.pop_front()
    }

    /// Returns the number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(feature = "std")]
pub use threaded::{EventReceiver, EventSender, channel};

#[cfg(feature = "std")]
mod threaded {
    use std::sync::mpsc;

    use super::{Event, EventQueue};

    /// Creates a connected sender/receiver pair.
    ///
    /// Hand the [`EventSender`] to callbacks on other threads; keep the
    /// [`EventReceiver`] on the session thread and
    /// [`pump`](EventReceiver::pump_into) it into the [`EventQueue`] before
    /// each drain.
    #[must_use]
    pub fn channel() -> (EventSender, EventReceiver) {
        let (tx, rx) = mpsc::channel();
        (EventSender { tx }, EventReceiver { rx })
    }

    /// A `Send + Clone` handle for posting events from any thread.
    #[derive(Clone, Debug)]
    pub struct EventSender {
        tx: mpsc::Sender<Event>,
    }

    impl EventSender {
        /// Posts an event. Returns `false` if the receiver was dropped.
        pub fn send(&self, event: Event) -> bool {
            self.tx.send(event).is_ok()
        }
    }

    /// The session-thread end of [`channel`].
    #[derive(Debug)]
    pub struct EventReceiver {
        rx: mpsc::Receiver<Event>,
    }

    impl EventReceiver {
        /// Moves every event posted so far into `queue`, preserving order.
        /// Returns how many were moved.
        pub fn pump_into(&self, queue: &mut EventQueue) -> usize {
            let before = queue.len();
            queue.extend(self.rx.try_iter());
            queue.len() - before
        }
    }
}
