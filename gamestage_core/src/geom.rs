// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-space primitives shared by the registry and the geometry generator.
//!
//! Screen-space values use [`kurbo`] types directly ([`kurbo::Point`] for tap
//! locations, [`kurbo::Size`] for pane dimensions). World space is 3-D, Y-up,
//! in meters, which `kurbo` does not model, so the two small types here fill
//! that gap.

use core::fmt;
use core::ops::{Add, Sub};

/// A point or offset in world space (meters, Y-up).
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    /// Lateral axis.
    pub x: f64,
    /// Vertical axis.
    pub y: f64,
    /// Depth axis.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Are all components finite?
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The planar size of a detected surface.
///
/// `width` runs along the surface's local X axis and `depth` along its local
/// Z axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    /// Size along local X.
    pub width: f64,
    /// Size along local Z.
    pub depth: f64,
}

impl Extent {
    /// Creates an extent.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }
}
