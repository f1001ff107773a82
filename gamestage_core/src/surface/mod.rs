// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracked-surface data model.
//!
//! A *surface* is a real-world planar region or recognized image that the
//! detection service is currently tracking. Each surface has:
//!
//! - An identity ([`SurfaceId`]) assigned by the detection service and stable
//!   for as long as the service tracks it.
//! - A classification ([`SurfaceKind`]) fixed at detection time.
//! - **Geometry** (center and extent) that the service refines over time via
//!   [`on_updated`](AnchorRegistry::on_updated).
//!
//! [`AnchorRegistry`] owns every surface's lifetime. Other components refer to
//! surfaces only by id, so geometry updates are visible to whoever looks the
//! surface up next.
//!
//! # Change tracking
//!
//! Notifications mark the corresponding dirty channel (see
//! [`dirty`](crate::dirty)); [`evaluate`](AnchorRegistry::evaluate) drains
//! them into a [`SurfaceChanges`] record.

mod changes;
mod id;
mod registry;

pub use changes::SurfaceChanges;
pub use id::{SurfaceId, SurfaceKind, SurfaceKinds};
pub use registry::{AnchorRegistry, DetectedSurface};
