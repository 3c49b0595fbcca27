//! Incremental synthesis.
//!
//! Grows a path set from the pins outward: each round wires the closest
//! (or a near-closest, depending on the window) unconnected pin to the
//! structure built so far, choosing whichever of the two L-shaped routes
//! adds fewer new segments.

use super::nearest::pick_closest;
use pinboard_common::db::paths::PathSet;
use pinboard_common::geom::point::Point;
use pinboard_common::geom::segment::PathElement;
use pinboard_common::geom::staircase::connect;
use rand::Rng;
use std::collections::HashSet;

/// Builds one candidate path set connecting every pin.
///
/// Segments are only appended if not already present (in either
/// direction), so the result has no duplicates. Fewer than two distinct
/// pins need no segments.
pub fn synthesize<R: Rng + ?Sized>(pins: &[Point], window: usize, rng: &mut R) -> PathSet {
    let mut seen_pins = HashSet::with_capacity(pins.len());
    let mut unconnected: Vec<Point> = pins.iter().copied().filter(|p| seen_pins.insert(*p)).collect();

    let mut paths = PathSet::new();
    if unconnected.len() < 2 {
        return paths;
    }

    let mut built: HashSet<PathElement> = HashSet::new();
    // Points on the structure, in the order they were first reached.
    let mut connected: Vec<Point> = Vec::new();
    let mut touched: HashSet<Point> = HashSet::new();

    while !unconnected.is_empty() {
        let anchors: &[Point] = if paths.is_empty() { &unconnected } else { &connected };
        let Some(pair) = pick_closest(rng, &unconnected, anchors, window) else {
            break;
        };

        let (a, b) = if rng.gen_bool(0.5) {
            (pair.pin, pair.anchor)
        } else {
            (pair.anchor, pair.pin)
        };

        let fresh = [connect(a, b), connect(b, a)]
            .into_iter()
            .map(|route| {
                route
                    .into_iter()
                    .filter(|s| !built.contains(s))
                    .collect::<Vec<_>>()
            })
            .min_by_key(Vec::len)
            .unwrap_or_default();

        for seg in fresh {
            built.insert(seg);
            paths.push(seg);
            for p in seg.points() {
                if touched.insert(p) {
                    connected.push(p);
                }
            }
        }

        let before = unconnected.len();
        unconnected.retain(|p| !touched.contains(p));
        debug_assert!(unconnected.len() < before, "round connected no pin");
    }

    paths
}
