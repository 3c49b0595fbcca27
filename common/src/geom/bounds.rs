use super::point::Point;
use super::segment::PathElement;

/// The square board `[0, size] x [0, size]`. `size` counts tiles, so a
/// board of size 10 has 11 pin holes per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardBounds {
    pub size: u32,
}

impl BoardBounds {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn holes(&self) -> usize {
        let side = self.size as usize + 1;
        side * side
    }

    #[inline(always)]
    pub fn contains(&self, p: Point) -> bool {
        p.x <= self.size && p.y <= self.size
    }

    pub fn contains_segment(&self, seg: &PathElement) -> bool {
        self.contains(seg.start) && self.contains(seg.end)
    }
}

impl Default for BoardBounds {
    fn default() -> Self {
        Self { size: 10 }
    }
}
