//! Connectivity oracle.
//!
//! Partitions the points touched by a path list into connected components
//! and labels every pin with the component it sits on. Pins that no path
//! touches get a singleton label of their own.

use crate::db::indices::{ClusterId, SegmentId};
use crate::error::BoardError;
use crate::geom::point::Point;
use crate::geom::segment::PathElement;
use std::collections::{BTreeSet, HashMap, HashSet};

pub type PointClusters = HashMap<Point, ClusterId>;
pub type PinClusters = HashMap<Point, ClusterId>;

#[derive(Clone, Debug, Default)]
pub struct Clusters {
    pub points: PointClusters,
    pub pins: PinClusters,
}

impl Clusters {
    /// Number of distinct labels across the pins.
    pub fn pin_cluster_count(&self) -> usize {
        self.pins.values().collect::<HashSet<_>>().len()
    }

    pub fn is_connected(&self) -> bool {
        self.pin_cluster_count() == 1
    }

    /// Point classes in a label-independent form, for comparing two runs.
    pub fn partition(&self) -> BTreeSet<BTreeSet<Point>> {
        let mut classes: HashMap<ClusterId, BTreeSet<Point>> = HashMap::new();
        for (&p, &label) in self.points.iter().chain(self.pins.iter()) {
            classes.entry(label).or_default().insert(p);
        }
        classes.into_values().collect()
    }
}

/// Labels every point on `paths` and every pin with a component id.
///
/// Labels are handed out in discovery order: components first, in the order
/// their first segment appears, then one fresh label per isolated pin.
pub fn cluster(paths: &[PathElement], pins: &[Point]) -> Result<Clusters, BoardError> {
    if paths.is_empty() {
        return Err(BoardError::InvalidInput(
            "path list is empty, did you pass pin data instead?".to_string(),
        ));
    }
    if let Some(index) = paths.iter().position(|s| s.is_degenerate()) {
        return Err(BoardError::InvalidInput(format!(
            "path element {index} starts and ends at the same point"
        )));
    }

    let mut point_owners: HashMap<Point, Vec<SegmentId>> = HashMap::with_capacity(paths.len() * 2);
    for (i, seg) in paths.iter().enumerate() {
        for p in seg.points() {
            point_owners.entry(p).or_default().push(SegmentId::new(i));
        }
    }

    let mut points = PointClusters::with_capacity(point_owners.len());
    let mut label = 0u32;
    let mut to_visit = Vec::new();

    for seed in paths.iter().map(|s| s.start) {
        if points.contains_key(&seed) {
            continue;
        }

        let current = ClusterId(label);
        to_visit.push(seed);
        while let Some(p) = to_visit.pop() {
            if points.contains_key(&p) {
                continue;
            }
            points.insert(p, current);

            let Some(owners) = point_owners.get(&p) else {
                continue;
            };
            for owner in owners {
                for q in paths[owner.index()].points() {
                    if !points.contains_key(&q) {
                        to_visit.push(q);
                    }
                }
            }
        }
        label += 1;
    }

    let mut pin_labels = PinClusters::with_capacity(pins.len());
    for &pin in pins {
        if pin_labels.contains_key(&pin) {
            continue;
        }
        let id = match points.get(&pin) {
            Some(&id) => id,
            None => {
                let id = ClusterId(label);
                label += 1;
                id
            }
        };
        pin_labels.insert(pin, id);
    }

    log::debug!(
        "Clustered {} segments into {} labels ({} pins)",
        paths.len(),
        label,
        pin_labels.len()
    );

    Ok(Clusters {
        points,
        pins: pin_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: (u32, u32), b: (u32, u32)) -> PathElement {
        PathElement::new(a.into(), b.into())
    }

    fn p(x: u32, y: u32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn straight_line_is_one_cluster() {
        let paths = vec![
            seg((0, 0), (1, 0)),
            seg((1, 0), (2, 0)),
            seg((3, 0), (2, 0)),
            seg((3, 0), (4, 0)),
        ];
        let pins = [p(0, 0), p(4, 0), p(2, 0)];
        let clusters = cluster(&paths, &pins).unwrap();

        assert_eq!(clusters.points.len(), 5);
        let labels: HashSet<_> = clusters.points.values().collect();
        assert_eq!(labels.len(), 1);
        assert!(clusters.is_connected());
    }

    #[test]
    fn disjoint_segments_are_two_clusters() {
        let paths = vec![seg((0, 0), (0, 1)), seg((5, 5), (6, 5))];
        let pins = [p(0, 0), p(6, 5)];
        let clusters = cluster(&paths, &pins).unwrap();

        assert_eq!(clusters.pin_cluster_count(), 2);
        assert!(!clusters.is_connected());
        assert_eq!(clusters.points[&p(0, 0)], clusters.points[&p(0, 1)]);
        assert_ne!(clusters.points[&p(0, 0)], clusters.points[&p(5, 5)]);
    }

    #[test]
    fn late_segment_joins_two_early_components() {
        // seeds (0,0) and (3,0) would be separate if segments were walked
        // in order; the bridge at the end joins them through the points.
        let paths = vec![
            seg((0, 0), (1, 0)),
            seg((3, 0), (2, 0)),
            seg((1, 0), (2, 0)),
        ];
        let clusters = cluster(&paths, &[p(0, 0), p(3, 0)]).unwrap();
        assert!(clusters.is_connected());
    }

    #[test]
    fn isolated_pins_get_fresh_labels() {
        let paths = vec![seg((0, 0), (0, 1))];
        let pins = [p(0, 1), p(7, 7), p(8, 8)];
        let clusters = cluster(&paths, &pins).unwrap();

        assert_eq!(clusters.pins.len(), 3);
        assert_eq!(clusters.pin_cluster_count(), 3);
        assert_eq!(clusters.pins[&p(0, 1)], clusters.points[&p(0, 0)]);
        assert!(!clusters.points.contains_key(&p(7, 7)));
    }

    #[test]
    fn rerun_gives_same_partition() {
        let paths = vec![
            seg((0, 1), (0, 2)),
            seg((4, 4), (4, 3)),
            seg((0, 2), (1, 2)),
            seg((4, 3), (5, 3)),
        ];
        let pins = [p(0, 1), p(5, 3), p(9, 9)];
        let a = cluster(&paths, &pins).unwrap();

        let mut reversed = paths.clone();
        reversed.reverse();
        let b = cluster(&reversed, &pins).unwrap();

        assert_eq!(a.partition(), b.partition());
        assert_eq!(a.partition(), cluster(&paths, &pins).unwrap().partition());
    }

    #[test]
    fn empty_paths_are_invalid_input() {
        let err = cluster(&[], &[p(0, 0)]).unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));
    }

    #[test]
    fn degenerate_segment_is_rejected() {
        let paths = vec![seg((0, 0), (0, 1)), seg((2, 2), (2, 2))];
        let err = cluster(&paths, &[]).unwrap_err();
        assert!(matches!(&err, BoardError::InvalidInput(msg) if msg.contains("element 1")));

        let only = vec![seg((2, 2), (2, 2))];
        assert!(matches!(cluster(&only, &[]), Err(BoardError::InvalidInput(_))));
    }
}
