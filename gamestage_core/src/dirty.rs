// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants for the anchor registry.
//!
//! The registry uses [`understory_dirty`] to record which surfaces changed
//! since the last [`evaluate`](crate::surface::AnchorRegistry::evaluate).
//! Surfaces do not depend on each other, so both channels are local-only: a
//! mark affects exactly the slot it names.
//!
//! Callers never query dirty state directly. Each `evaluate` call drains both
//! channels into a [`SurfaceChanges`](crate::surface::SurfaceChanges) record,
//! which the session turns into indicator and gamespace updates.

use understory_dirty::Channel;

/// Center or extent of a surface changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// A surface was inserted or removed.
pub const TOPOLOGY: Channel = Channel::new(1);
