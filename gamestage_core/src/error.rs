// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for registry and selection operations.
//!
//! None of these errors is fatal. A [`RegistryError`] means the detection
//! service broke its contract, and the offending notification is dropped. A
//! [`SelectionError`] means a tap could not be turned into a commitment, and
//! the session stays in its current state. Either way the
//! [`Session`](crate::session::Session) reports a
//! [`DiagnosticEvent`](crate::trace::DiagnosticEvent) and carries on.

use core::fmt;

use crate::surface::SurfaceId;

/// The detection service delivered a notification that contradicts the
/// registry's current contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A surface was reported as detected while already registered.
    DuplicateId(SurfaceId),
    /// An update or removal named a surface that is not registered.
    UnknownAnchor(SurfaceId),
}

impl RegistryError {
    /// The surface the offending notification named.
    #[must_use]
    pub const fn surface(self) -> SurfaceId {
        match self {
            Self::DuplicateId(id) | Self::UnknownAnchor(id) => id,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "surface {id} detected twice"),
            Self::UnknownAnchor(id) => write!(f, "surface {id} is not registered"),
        }
    }
}

impl core::error::Error for RegistryError {}

/// A selection request could not be honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The tap produced no candidate, or the ranked candidate is no longer
    /// selectable.
    NoHitSelected,
    /// A selection arrived while another surface is already committed.
    InconsistentSelection {
        /// The surface the rejected request asked for.
        requested: SurfaceId,
        /// The surface that stays committed.
        committed: SurfaceId,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHitSelected => f.write_str("tap did not hit a selectable surface"),
            Self::InconsistentSelection {
                requested,
                committed,
            } => write!(
                f,
                "cannot select surface {requested}: surface {committed} is already committed"
            ),
        }
    }
}

impl core::error::Error for SelectionError {}

/// Coarse classification of a [`SessionError`], used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The detection service broke its contract.
    ProtocolViolation,
    /// A tap did not resolve to a selectable surface.
    NoHitSelected,
    /// A selection raced an existing commitment.
    InconsistentSelection,
}

/// Any error a [`Session`](crate::session::Session) operation can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// See [`RegistryError`].
    Registry(RegistryError),
    /// See [`SelectionError`].
    Selection(SelectionError),
}

impl SessionError {
    /// Returns the diagnostic class of this error.
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::Registry(_) => ErrorClass::ProtocolViolation,
            Self::Selection(SelectionError::NoHitSelected) => ErrorClass::NoHitSelected,
            Self::Selection(SelectionError::InconsistentSelection { .. }) => {
                ErrorClass::InconsistentSelection
            }
        }
    }

    /// The surface the error concerns, if any.
    #[must_use]
    pub const fn surface(self) -> Option<SurfaceId> {
        match self {
            Self::Registry(e) => Some(e.surface()),
            Self::Selection(SelectionError::NoHitSelected) => None,
            Self::Selection(SelectionError::InconsistentSelection { requested, .. }) => {
                Some(requested)
            }
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => fmt::Display::fmt(e, f),
            Self::Selection(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl core::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Selection(e) => Some(e),
        }
    }
}

impl From<RegistryError> for SessionError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<SelectionError> for SessionError {
    fn from(e: SelectionError) -> Self {
        Self::Selection(e)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn classes() {
        let dup = SessionError::from(RegistryError::DuplicateId(SurfaceId(1)));
        assert_eq!(dup.class(), ErrorClass::ProtocolViolation);
        assert_eq!(dup.surface(), Some(SurfaceId(1)));

        let miss = SessionError::from(SelectionError::NoHitSelected);
        assert_eq!(miss.class(), ErrorClass::NoHitSelected);
        assert_eq!(miss.surface(), None);

        let race = SessionError::from(SelectionError::InconsistentSelection {
            requested: SurfaceId(2),
            committed: SurfaceId(3),
        });
        assert_eq!(race.class(), ErrorClass::InconsistentSelection);
        assert_eq!(race.surface(), Some(SurfaceId(2)));
    }

    #[test]
    fn display_names_the_surface() {
        let e = SessionError::from(RegistryError::UnknownAnchor(SurfaceId(9)));
        assert_eq!(e.to_string(), "surface #9 is not registered");
    }
}
