// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface identity and classification types.

use core::fmt;

/// An opaque, stable identifier for a tracked surface.
///
/// Identifiers are assigned by the detection service and never reused for a
/// different surface while a session is live. Core code compares them but
/// never interprets the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of real-world feature a surface was detected from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// A vertical plane (wall, door, cabinet front).
    PlaneVertical,
    /// A horizontal plane (floor, table top).
    PlaneHorizontal,
    /// A recognized reference image.
    RecognizedImage,
}

impl SurfaceKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [
        Self::PlaneVertical,
        Self::PlaneHorizontal,
        Self::RecognizedImage,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::PlaneVertical => 1 << 0,
            Self::PlaneHorizontal => 1 << 1,
            Self::RecognizedImage => 1 << 2,
        }
    }
}

/// A set of [`SurfaceKind`]s, used to tell the detection service what to look
/// for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceKinds(u8);

impl SurfaceKinds {
    /// No kinds; detection is effectively off.
    pub const NONE: Self = Self(0);

    /// Vertical planes only.
    pub const VERTICAL: Self = Self(SurfaceKind::PlaneVertical.bit());

    /// Horizontal planes only.
    pub const HORIZONTAL: Self = Self(SurfaceKind::PlaneHorizontal.bit());

    /// Both plane orientations.
    pub const PLANES: Self = Self(Self::VERTICAL.0 | Self::HORIZONTAL.0);

    /// Creates a set containing exactly `kind`.
    #[inline]
    #[must_use]
    pub const fn only(kind: SurfaceKind) -> Self {
        Self(kind.bit())
    }

    /// Returns this set with `kind` added.
    #[inline]
    #[must_use]
    pub const fn with(self, kind: SurfaceKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns whether `kind` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, kind: SurfaceKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained kinds in declaration order.
    pub fn iter(self) -> impl Iterator<Item = SurfaceKind> {
        SurfaceKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl fmt::Debug for SurfaceKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
