// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor tracking and tap-to-select for surface-anchored gamespaces.
//!
//! `gamestage_core` keeps track of the real-world surfaces an AR detection
//! service reports, lets the user pick one with a tap, and then builds a
//! gamespace on it: content at the surface's center and four occluder panes
//! that hide everything outside the gamespace's footprint. It is `no_std`
//! compatible (with `alloc`) and knows nothing about any particular tracking
//! SDK or renderer.
//!
//! # Architecture
//!
//! ```text
//!   DetectionService ──► Event::{Detected, Updated, Removed} ─┐
//!   host input ────────► Event::Tap ──────────────────────────┤
//!                                                             ▼
//!                                                        EventQueue
//!                                                             │
//!                                                 Session::drain()
//!                                 ┌───────────────────────────┤
//!                                 ▼                           ▼
//!        AnchorRegistry::evaluate() ──► SurfaceChanges   Prober ──► rank()
//!                                 │                           │
//!                                 ▼                           ▼
//!                 Presenter (indicators)       SelectionState::commit()
//!                                                             │
//!                                                             ▼
//!                       occluder::generate() ──► Presenter (gamespace)
//! ```
//!
//! **[`surface`]**: The [`AnchorRegistry`](surface::AnchorRegistry) mirrors
//! the detection service's live surfaces. Mutations mark channels in a
//! [`dirty`] tracker; [`evaluate`](surface::AnchorRegistry::evaluate) drains
//! them into a batch of added, updated, and removed ids.
//!
//! **[`rank`]**: Picks the nearest hit from a probe.
//!
//! **[`selection`]**: The Browse ⇄ Play state. The committed surface lives
//! inside the `Play` variant.
//!
//! **[`occluder`]**: Pure geometry for the four panes around a committed
//! surface.
//!
//! **[`session`]**: Owns the registry and selection state and sequences the
//! side effects of every transition through the [`backend`] traits.
//!
//! **[`event`]**: Serializes notifications and taps into one FIFO.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! session instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies and
//!   the cross-thread [`event::channel`].
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod backend;
pub mod config;
pub mod dirty;
pub mod error;
pub mod event;
pub mod geom;
pub mod occluder;
pub mod rank;
pub mod selection;
pub mod session;
pub mod surface;
pub mod trace;
pub mod transform;
