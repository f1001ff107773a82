// Copyright 2026 the Gamestage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap disambiguation.
//!
//! A probe from a screen point can pass through several overlapping surfaces.
//! The ranker picks the one closest to the probe origin so that the user gets
//! the surface they were visually pointing at.

use crate::surface::SurfaceId;

/// One surface intersected by a probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitCandidate {
    /// The intersected surface.
    pub surface: SurfaceId,
    /// Distance from the probe origin to the intersection, in meters.
    pub distance: f64,
}

impl HitCandidate {
    /// Creates a candidate.
    #[inline]
    #[must_use]
    pub const fn new(surface: SurfaceId, distance: f64) -> Self {
        Self { surface, distance }
    }
}

/// Returns the closest candidate.
///
/// Single pass with a running minimum. A later candidate replaces the current
/// best only when it is strictly closer, so the first-seen candidate wins
/// ties. NaN distances never compare closer than anything, so a NaN
/// candidate can only win when it comes first and nothing finite follows.
#[must_use]
pub fn rank_candidate(candidates: &[HitCandidate]) -> Option<HitCandidate> {
    let mut iter = candidates.iter();
    let mut best = *iter.next()?;
    for c in iter {
        if c.distance < best.distance || (best.distance.is_nan() && !c.distance.is_nan()) {
            best = *c;
        }
    }
    Some(best)
}

/// Returns the id of the closest candidate, or `None` for an empty probe.
#[inline]
#[must_use]
pub fn rank(candidates: &[HitCandidate]) -> Option<SurfaceId> {
    rank_candidate(candidates).map(|c| c.surface)
}


#[cfg(test)]
mod proptests {
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;

    // -- Strategy helpers --

    /// Candidates on ids `0..n` with pairwise distinct distances.
    fn arb_distinct_hits() -> impl Strategy<Value = Vec<HitCandidate>> {
        prop::collection::btree_set(0_u16..2000, 1..12).prop_map(|distances| {
            distances
                .into_iter()
                .zip(0_u64..)
                .map(|(d, id)| HitCandidate::new(SurfaceId(id), f64::from(d) / 100.0))
                .collect()
        })
    }

    /// A hit list and a reordering of it.
    fn arb_permuted_hits() -> impl Strategy<Value = (Vec<HitCandidate>, Vec<HitCandidate>)> {
        arb_distinct_hits().prop_flat_map(|hits| (Just(hits.clone()), Just(hits).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn rank_ignores_hit_order((hits, shuffled) in arb_permuted_hits()) {
            let nearest = hits
                .iter()
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
                .map(|c| c.surface);
            prop_assert_eq!(rank(&hits), nearest);
            prop_assert_eq!(rank(&shuffled), nearest, "reordered as {:?}", shuffled);
        }

        #[test]
        fn rank_picks_first_of_the_nearest(distances in prop::collection::vec(0_u8..6, 1..12)) {
            let hits: Vec<HitCandidate> = distances
                .iter()
                .zip(0_u64..)
                .map(|(&d, id)| HitCandidate::new(SurfaceId(id), f64::from(d)))
                .collect();
            let min = distances.iter().copied().min();
            let first = distances
                .iter()
                .zip(0_u64..)
                .find(|(d, _)| Some(**d) == min)
                .map(|(_, id)| SurfaceId(id));
            prop_assert_eq!(rank(&hits), first);
        }
    }
}
