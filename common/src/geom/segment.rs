use super::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A unit step between two grid-adjacent points.
///
/// The segment is undirected: `(a, b)` and `(b, a)` compare and hash equal.
/// `start`/`end` keep the order in which the segment was built so that a
/// staircase reads as a walk from one end to the other.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(from = "(Point, Point)", into = "(Point, Point)")]
pub struct PathElement {
    pub start: Point,
    pub end: Point,
}

impl PathElement {
    #[inline(always)]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Endpoints with the smaller point first.
    #[inline(always)]
    pub fn canonical(&self) -> (Point, Point) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    pub fn sorted(&self) -> Self {
        let (start, end) = self.canonical();
        Self { start, end }
    }

    #[inline(always)]
    pub fn length(&self) -> u32 {
        self.start.manhattan(&self.end)
    }

    #[inline(always)]
    pub fn is_unit(&self) -> bool {
        self.length() == 1
    }

    #[inline(always)]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline(always)]
    pub fn touches(&self, p: Point) -> bool {
        self.start == p || self.end == p
    }

    #[inline(always)]
    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y && self.start.x != self.end.x
    }
}

impl PartialEq for PathElement {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for PathElement {}

impl Hash for PathElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl From<(Point, Point)> for PathElement {
    fn from((start, end): (Point, Point)) -> Self {
        Self { start, end }
    }
}

impl From<PathElement> for (Point, Point) {
    fn from(seg: PathElement) -> Self {
        (seg.start, seg.end)
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
