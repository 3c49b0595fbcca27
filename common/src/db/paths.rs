use crate::geom::point::Point;
use crate::geom::segment::PathElement;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// An ordered list of path elements.
///
/// Duplicates are allowed; `len` counts them, `unique_len` does not.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSet {
    elements: Vec<PathElement>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, seg: PathElement) {
        self.elements.push(seg);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of distinct undirected segments.
    pub fn unique_len(&self) -> usize {
        self.elements.iter().collect::<HashSet<_>>().len()
    }

    pub fn duplicates(&self) -> usize {
        self.len() - self.unique_len()
    }

    /// Distinct points touched by any segment, in sorted order.
    pub fn points(&self) -> BTreeSet<Point> {
        self.elements.iter().flat_map(|s| s.points()).collect()
    }

    pub fn touches(&self, p: Point) -> bool {
        self.elements.iter().any(|s| s.touches(p))
    }

    pub fn contains(&self, seg: &PathElement) -> bool {
        self.elements.iter().any(|s| s == seg)
    }

    /// Drops repeated segments, keeping the first occurrence of each.
    pub fn dedup(&self) -> PathSet {
        let mut seen = HashSet::with_capacity(self.len());
        self.elements
            .iter()
            .filter(|s| seen.insert(**s))
            .copied()
            .collect()
    }

    /// Each segment with its endpoints in canonical order.
    pub fn sorted(&self) -> PathSet {
        self.elements.iter().map(PathElement::sorted).collect()
    }
}

impl From<Vec<PathElement>> for PathSet {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<PathElement> for PathSet {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<PathElement> for PathSet {
    fn extend<I: IntoIterator<Item = PathElement>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Removes repeated pins, keeping first occurrences. Returns the unique pins
/// and how many were dropped.
pub fn dedup_pins(pins: &[Point]) -> (Vec<Point>, usize) {
    let mut seen = HashSet::with_capacity(pins.len());
    let unique: Vec<Point> = pins.iter().copied().filter(|p| seen.insert(*p)).collect();
    let removed = pins.len() - unique.len();
    if removed > 0 {
        let (was, s) = if removed == 1 { ("was", "") } else { ("were", "s") };
        log::warn!("Pins contained {} duplicate{} which {} purged.", removed, s, was);
    }
    (unique, removed)
}
