// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browse ⇄ Play selection state.
//!
//! ```text
//!             select(id)              ┌──────────────┐
//!   ┌────────┐ ────────────────────► │ Play { id }  │
//!   │ Browse │                       └──────────────┘
//!   └────────┘ ◄──────────────────── resume() / anchor_lost(id)
//! ```
//!
//! [`SelectionState`] carries the committed surface inside the `Play`
//! variant, so "committed iff Play" holds by construction. The state itself
//! only records the commitment; the side effects of each transition (pausing
//! detection, discarding competing surfaces, spawning the gamespace) are
//! sequenced by the [`Session`](crate::session::Session).

use crate::error::SelectionError;
use crate::surface::SurfaceId;

/// The session's interaction mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Detection active, every surface shows an indicator, taps select.
    Browse,
    /// Detection paused, one surface committed with a gamespace on it.
    Play,
}

/// Current mode plus the committed surface, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    /// No surface committed.
    #[default]
    Browse,
    /// `anchor` is committed.
    Play {
        /// The committed surface.
        anchor: SurfaceId,
    },
}

impl SelectionState {
    /// Returns the mode.
    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::Browse => Mode::Browse,
            Self::Play { .. } => Mode::Play,
        }
    }

    /// Returns the committed surface, present exactly in Play.
    #[must_use]
    pub const fn committed(self) -> Option<SurfaceId> {
        match self {
            Self::Browse => None,
            Self::Play { anchor } => Some(anchor),
        }
    }

    /// Returns whether `id` is the committed surface.
    #[must_use]
    pub fn is_committed(self, id: SurfaceId) -> bool {
        self.committed() == Some(id)
    }

    /// Commits `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InconsistentSelection`] when a surface is
    /// already committed; the existing commitment is kept.
    pub fn commit(&mut self, id: SurfaceId) -> Result<(), SelectionError> {
        match *self {
            Self::Browse => {
                *self = Self::Play { anchor: id };
                Ok(())
            }
            Self::Play { anchor } => Err(SelectionError::InconsistentSelection {
                requested: id,
                committed: anchor,
            }),
        }
    }

    /// Drops the commitment, returning the surface that was committed.
    ///
    /// Returns `None` (and changes nothing) in Browse.
    pub fn release(&mut self) -> Option<SurfaceId> {
        let anchor = self.committed();
        *self = Self::Browse;
        anchor
    }
}
