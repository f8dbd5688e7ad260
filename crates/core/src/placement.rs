//! Placement representation for positioned boxes.

use crate::geometry::{BoxId, Dimensions, Offset, Orientation};
use crate::region::Region;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box together with the position chosen for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionedBox {
    /// The ID of the placed box.
    pub box_id: BoxId,

    /// Effective dimensions after the orientation is applied.
    pub size: Dimensions,

    /// Minimum corner in the truck frame.
    pub offset: Offset,

    /// The orientation used.
    pub orientation: Orientation,

    /// Route order of the box.
    pub route_order: i64,
}

impl PositionedBox {
    /// Returns the occupied region.
    pub fn region(&self) -> Region {
        Region::from_origin_and_size(self.offset, &self.size)
    }

    /// Returns the door-axis interval `[start, end)`.
    pub fn accessibility_interval(&self) -> (f64, f64) {
        (self.offset.x, self.offset.x + self.size.length())
    }
}

/// Mapping from box identifier to placement, covering every input box once.
///
/// Boxes are kept in the order they were given to the solver.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    boxes: Vec<PositionedBox>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<BoxId, usize>,
}

impl Placement {
    /// Creates a placement from positioned boxes.
    pub fn new(boxes: Vec<PositionedBox>) -> Self {
        let index = boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (b.box_id.clone(), i))
            .collect();
        Self { boxes, index }
    }

    /// Creates an empty placement.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of placed boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Looks up a positioned box by id.
    pub fn get(&self, box_id: &str) -> Option<&PositionedBox> {
        match self.index.get(box_id) {
            Some(&i) => self.boxes.get(i),
            // Deserialized placements carry no index.
            None => self.boxes.iter().find(|b| b.box_id == box_id),
        }
    }

    /// Returns the offset chosen for a box.
    pub fn offset(&self, box_id: &str) -> Option<Offset> {
        self.get(box_id).map(|b| b.offset)
    }

    /// Iterates over positioned boxes in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, PositionedBox> {
        self.boxes.iter()
    }

    /// Returns the positioned boxes in input order.
    pub fn boxes(&self) -> &[PositionedBox] {
        &self.boxes
    }

    /// Returns the total occupied volume.
    pub fn occupied_volume(&self) -> f64 {
        self.boxes.iter().map(|b| b.size.volume()).sum()
    }

    /// Computes placement statistics.
    pub fn stats(&self) -> PlacementStats {
        PlacementStats::from_boxes(&self.boxes)
    }
}

impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        self.boxes == other.boxes
    }
}

impl<'a> IntoIterator for &'a Placement {
    type Item = &'a PositionedBox;
    type IntoIter = std::slice::Iter<'a, PositionedBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

/// Placement statistics.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Number of boxes not in their given orientation.
    pub rotated_count: usize,
    /// Distribution of orientation indices used.
    pub orientation_distribution: HashMap<usize, usize>,
    /// Deepest door-axis extent reached by any box.
    pub loaded_length: f64,
}

impl PlacementStats {
    /// Computes statistics from a set of positioned boxes.
    pub fn from_boxes(boxes: &[PositionedBox]) -> Self {
        let mut stats = Self {
            count: boxes.len(),
            ..Default::default()
        };

        for b in boxes {
            if b.orientation.is_rotated() {
                stats.rotated_count += 1;
            }
            *stats
                .orientation_distribution
                .entry(b.orientation.index())
                .or_insert(0) += 1;
            stats.loaded_length = stats.loaded_length.max(b.accessibility_interval().1);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioned(id: &str, x: f64, orientation: Orientation) -> PositionedBox {
        PositionedBox {
            box_id: id.to_string(),
            size: Dimensions::new(2.0, 1.0, 1.0),
            offset: Offset::new(x, 0.0, 0.0),
            orientation,
            route_order: 0,
        }
    }

    #[test]
    fn test_lookup() {
        let placement = Placement::new(vec![
            positioned("a", 0.0, Orientation::Lwh),
            positioned("b", 2.0, Orientation::Lwh),
        ]);
        assert_eq!(placement.len(), 2);
        assert_eq!(placement.offset("b"), Some(Offset::new(2.0, 0.0, 0.0)));
        assert!(placement.get("c").is_none());
        let ids: Vec<&str> = placement.iter().map(|b| b.box_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_empty() {
        let placement = Placement::empty();
        assert!(placement.is_empty());
        assert_eq!(placement.occupied_volume(), 0.0);
    }

    #[test]
    fn test_accessibility_interval() {
        let b = positioned("a", 3.0, Orientation::Lwh);
        assert_eq!(b.accessibility_interval(), (3.0, 5.0));
    }

    #[test]
    fn test_placement_stats() {
        let placement = Placement::new(vec![
            positioned("a", 0.0, Orientation::Lwh),
            positioned("b", 2.0, Orientation::Wlh),
            positioned("c", 4.0, Orientation::Lwh),
        ]);

        let stats = placement.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.rotated_count, 1);
        assert_eq!(stats.orientation_distribution.get(&0), Some(&2));
        assert_eq!(stats.orientation_distribution.get(&2), Some(&1));
        assert_eq!(stats.loaded_length, 6.0);
    }
}
