//! Rejection-sampling placement for world generation and reseeding.

use crate::rng::SimRng;
use crate::vector::Vec2;

/// Draw uniform points in the square `[-scale, scale]²` until `accept`
/// returns true, and return the accepted point.
///
/// Deliberately unbounded: termination relies on the predicate being
/// satisfiable within the sampled region, and a retry cap would change the
/// observable distribution. Callers (and tests) are responsible for
/// configuring predicates that leave room -- an over-crowded region makes
/// this loop spin forever, a known non-guarantee inherited from the game's
/// design.
pub fn find_random(rng: &mut SimRng, scale: f64, accept: impl Fn(Vec2) -> bool) -> Vec2 {
    loop {
        let candidate = rng.point_in_box(scale);
        if accept(candidate) {
            return candidate;
        }
    }
}
