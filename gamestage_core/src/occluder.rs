// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Occluder geometry for a committed surface.
//!
//! The gamespace is a box hanging `depth` meters below the committed surface.
//! Four upright panes wall it off along the surface's edges. The renderer
//! draws them depth-only (no color writes), so they hide anything behind them
//! while staying invisible themselves; looking into the box through the
//! surface then reads as looking through a window.
//!
//! ```text
//!              Top (yaw 180°)
//!          +-------------------+
//!          |                   |
//!   Left   |        C          |   Right
//! (yaw -90°)                   | (yaw +90°)
//!          |                   |
//!          +-------------------+
//!             Bottom (yaw 0°)
//!
//!   X →, Z ↓ (looking down onto the surface)
//! ```

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::Size;

use crate::geom::{Extent, Vec3};
use crate::transform::Transform3d;

/// Which edge of the gamespace a pane closes off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OccluderSide {
    /// Far edge (−Z).
    Top,
    /// Near edge (+Z).
    Bottom,
    /// −X edge.
    Left,
    /// +X edge.
    Right,
}

impl OccluderSide {
    /// All sides, in generation order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// One upright, depth-only rectangle bounding the gamespace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccluderPane {
    /// Which edge this pane closes off.
    pub side: OccluderSide,
    /// Center of the pane in world space.
    pub position: Vec3,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f64,
    /// Pane width (along its local X) and height (vertical).
    pub size: Size,
}

impl OccluderPane {
    /// Returns the pane's placement as translation × yaw rotation.
    #[must_use]
    pub fn transform(&self) -> Transform3d {
        Transform3d::from_translation(self.position) * Transform3d::from_rotation_y(self.yaw)
    }
}

/// Derives the four occluder panes for a surface.
///
/// Top and Bottom span the surface width and sit on the far and near edges;
/// Left and Right span the surface depth and sit on the side edges. Every
/// pane is `depth` tall and centered `depth / 2` below the surface.
///
/// Pure: the same inputs always produce bit-identical panes, in
/// [`OccluderSide::ALL`] order.
#[must_use]
pub fn generate(center: Vec3, extent: Extent, depth: f64) -> [OccluderPane; 4] {
    let y = center.y - depth / 2.0;
    let half_w = extent.width / 2.0;
    let half_d = extent.depth / 2.0;

    OccluderSide::ALL.map(|side| match side {
        OccluderSide::Top => OccluderPane {
            side,
            position: Vec3::new(center.x, y, center.z - half_d),
            yaw: PI,
            size: Size::new(extent.width, depth),
        },
        OccluderSide::Bottom => OccluderPane {
            side,
            position: Vec3::new(center.x, y, center.z + half_d),
            yaw: 0.0,
            size: Size::new(extent.width, depth),
        },
        OccluderSide::Left => OccluderPane {
            side,
            position: Vec3::new(center.x - half_w, y, center.z),
            yaw: -FRAC_PI_2,
            size: Size::new(extent.depth, depth),
        },
        OccluderSide::Right => OccluderPane {
            side,
            position: Vec3::new(center.x + half_w, y, center.z),
            yaw: FRAC_PI_2,
            size: Size::new(extent.depth, depth),
        },
    })
}
