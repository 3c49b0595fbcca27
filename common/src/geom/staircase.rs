use super::point::Point;
use super::segment::PathElement;

/// Builds the L-shaped staircase from `from` to `to`: the full x distance at
/// `from.y` first, then the full y distance at `to.x`. One segment per unit
/// step.
///
/// The result depends on argument order; `connect(b, a)` turns the other
/// corner of the bounding box.
pub fn connect(from: Point, to: Point) -> Vec<PathElement> {
    let mut steps = Vec::with_capacity((from.manhattan(&to) + 2) as usize);

    if from.x != to.x {
        steps.extend(axis_walk(from.x, to.x).map(|x| Point::new(x, from.y)));
    }
    if from.y != to.y {
        steps.extend(axis_walk(from.y, to.y).map(|y| Point::new(to.x, y)));
    }

    // The corner appears at the end of one leg and the start of the next.
    steps
        .windows(2)
        .filter(|w| w[0] != w[1])
        .map(|w| PathElement::new(w[0], w[1]))
        .collect()
}

/// Every coordinate from `a` to `b`, both inclusive, in walking order.
fn axis_walk(a: u32, b: u32) -> Box<dyn Iterator<Item = u32>> {
    if a <= b {
        Box::new(a..=b)
    } else {
        Box::new((b..=a).rev())
    }
}
