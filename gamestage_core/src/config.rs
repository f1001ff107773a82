// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use crate::surface::{SurfaceKind, SurfaceKinds};

/// Configuration for a [`Session`](crate::session::Session).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Which surface kinds the detection service looks for while browsing.
    pub browse_kinds: SurfaceKinds,
    /// How far the gamespace extends below the committed surface, in meters.
    /// Also the height of every occluder pane.
    pub gamespace_depth: f64,
}

impl SessionConfig {
    /// Default gamespace depth, in meters.
    pub const DEFAULT_GAMESPACE_DEPTH: f64 = 3.0;

    /// Detects walls and other vertical planes.
    #[must_use]
    pub const fn vertical_planes() -> Self {
        Self {
            browse_kinds: SurfaceKinds::VERTICAL,
            gamespace_depth: Self::DEFAULT_GAMESPACE_DEPTH,
        }
    }

    /// Detects floors, tables, and other horizontal planes.
    #[must_use]
    pub const fn horizontal_planes() -> Self {
        Self {
            browse_kinds: SurfaceKinds::HORIZONTAL,
            gamespace_depth: Self::DEFAULT_GAMESPACE_DEPTH,
        }
    }

    /// Also detects recognized reference images.
    #[must_use]
    pub const fn with_images(mut self) -> Self {
        self.browse_kinds = self.browse_kinds.with(SurfaceKind::RecognizedImage);
        self
    }

    /// Overrides the gamespace depth.
    #[must_use]
    pub const fn with_gamespace_depth(mut self, depth: f64) -> Self {
        self.gamespace_depth = depth;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::vertical_planes()
    }
}
