use crate::db::cluster::cluster;
use crate::error::BoardError;
use crate::geom::bounds::BoardBounds;
use crate::geom::point::Point;
use crate::geom::segment::PathElement;
use std::collections::HashSet;

/// Checks every segment in order: non-degenerate, on the board, length 1.
/// Returns the first violation.
pub fn validate_paths(paths: &[PathElement], bounds: BoardBounds) -> Result<(), BoardError> {
    for (index, seg) in paths.iter().enumerate() {
        if seg.is_degenerate() {
            return Err(BoardError::DegenerateSegment { index });
        }
        for point in seg.points() {
            if !bounds.contains(point) {
                return Err(BoardError::OutOfBounds {
                    point,
                    size: bounds.size,
                });
            }
        }
        let length = seg.length();
        if length != 1 {
            return Err(BoardError::NotUnitLength { index, length });
        }
    }
    Ok(())
}

pub fn validate_pins(pins: &[Point], bounds: BoardBounds) -> Result<(), BoardError> {
    if pins.is_empty() {
        return Err(BoardError::EmptyPinSet);
    }
    let mut seen = HashSet::with_capacity(pins.len());
    for &pin in pins {
        if !bounds.contains(pin) {
            return Err(BoardError::OutOfBounds {
                point: pin,
                size: bounds.size,
            });
        }
        if !seen.insert(pin) {
            return Err(BoardError::DuplicatePin(pin));
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub is_success: bool,
    /// Distinct segments; repeated segments are not charged twice.
    pub paths_used: usize,
    pub duplicates: usize,
    pub pin_clusters: usize,
}

/// Scores a path list against its pins: success means every pin ends up in
/// one component. Fewer than two pins are trivially connected.
pub fn score(paths: &[PathElement], pins: &[Point]) -> Result<Score, BoardError> {
    let paths_used = paths.iter().collect::<HashSet<_>>().len();
    let duplicates = paths.len() - paths_used;
    if duplicates > 0 {
        let (was, s) = if duplicates == 1 { ("was", "") } else { ("were", "s") };
        log::warn!(
            "Paths contained {} duplicate{} which {} not counted.",
            duplicates,
            s,
            was
        );
    }

    if pins.len() < 2 && paths.is_empty() {
        return Ok(Score {
            is_success: true,
            paths_used: 0,
            duplicates: 0,
            pin_clusters: pins.len(),
        });
    }

    let clusters = cluster(paths, pins)?;
    let pin_clusters = clusters.pin_cluster_count();
    Ok(Score {
        is_success: pin_clusters <= 1,
        paths_used,
        duplicates,
        pin_clusters,
    })
}
