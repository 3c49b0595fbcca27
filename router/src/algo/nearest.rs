use pinboard_common::geom::point::Point;
use rand::Rng;

/// An unconnected pin and a point it could be wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidatePair {
    pub pin: Point,
    pub anchor: Point,
    pub distance: u32,
    // Enumeration order; breaks distance ties so selection is reproducible.
    order: u32,
}

/// All `(pin, anchor)` pairs with `pin != anchor`, in enumeration order
/// (pins outer, anchors inner).
pub fn candidate_pairs(pins: &[Point], anchors: &[Point]) -> Vec<CandidatePair> {
    let mut pairs = Vec::with_capacity(pins.len() * anchors.len());
    for &pin in pins {
        for &anchor in anchors {
            if anchor == pin {
                continue;
            }
            pairs.push(CandidatePair {
                pin,
                anchor,
                distance: pin.manhattan(&anchor),
                order: pairs.len() as u32,
            });
        }
    }
    pairs
}

/// Picks uniformly among the `window + 1` closest pairs. `window == 0` is
/// plain greedy. Returns `None` when there is nothing to pair.
pub fn pick_closest<R: Rng + ?Sized>(
    rng: &mut R,
    pins: &[Point],
    anchors: &[Point],
    window: usize,
) -> Option<CandidatePair> {
    let mut pairs = candidate_pairs(pins, anchors);
    if pairs.is_empty() {
        return None;
    }

    let k = window.min(pairs.len() - 1);
    pairs.select_nth_unstable_by_key(k, |p| (p.distance, p.order));
    let head = &mut pairs[..=k];
    head.sort_unstable_by_key(|p| (p.distance, p.order));

    let pick = if k == 0 { 0 } else { rng.gen_range(0..=k) };
    Some(head[pick])
}
