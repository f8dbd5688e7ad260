//! Axis-aligned cuboid regions.

use crate::geometry::{Dimensions, EPSILON};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns true if the intervals `[a_min, a_max)` and `[b_min, b_max)` share
/// more than [`EPSILON`] of length.
pub fn spans_overlap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> bool {
    a_min < b_max - EPSILON && b_min < a_max - EPSILON
}

/// An axis-aligned cuboid given by its minimum and maximum corner.
///
/// Faces touching is not an intersection: two regions intersect only if
/// their overlap has positive volume.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Maximum corner.
    pub max: Vector3<f64>,
}

impl Region {
    /// Creates a region from its corners.
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Creates the region occupied by a box of `size` at `origin`.
    pub fn from_origin_and_size(origin: Vector3<f64>, size: &Dimensions) -> Self {
        Self {
            min: origin,
            max: origin + size.as_vector(),
        }
    }

    /// Creates a region spanning from the origin to `size`.
    pub fn from_size(size: &Dimensions) -> Self {
        Self::from_origin_and_size(Vector3::zeros(), size)
    }

    /// Returns the extents.
    pub fn size(&self) -> Dimensions {
        Dimensions::from_vector(self.max - self.min)
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        let d = self.max - self.min;
        d.x * d.y * d.z
    }

    /// Returns true if some extent is not larger than [`EPSILON`].
    pub fn is_degenerate(&self) -> bool {
        (0..3).any(|axis| self.max[axis] - self.min[axis] <= EPSILON)
    }

    /// Returns true if the overlap along `axis` has positive length.
    pub fn overlaps_on_axis(&self, other: &Region, axis: usize) -> bool {
        spans_overlap(self.min[axis], self.max[axis], other.min[axis], other.max[axis])
    }

    /// Returns true if the two regions share positive volume.
    pub fn intersects(&self, other: &Region) -> bool {
        (0..3).all(|axis| self.overlaps_on_axis(other, axis))
    }

    /// Returns true if the (y, z) projections share positive area.
    pub fn footprint_overlaps(&self, other: &Region) -> bool {
        self.overlaps_on_axis(other, 1) && self.overlaps_on_axis(other, 2)
    }

    /// Returns true if `other` lies fully inside `self`.
    pub fn contains(&self, other: &Region) -> bool {
        (0..3).all(|axis| {
            other.min[axis] >= self.min[axis] - EPSILON
                && other.max[axis] <= self.max[axis] + EPSILON
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube(x: f64, y: f64, z: f64, side: f64) -> Region {
        Region::from_origin_and_size(Vector3::new(x, y, z), &Dimensions::new(side, side, side))
    }

    #[test]
    fn test_volume_and_size() {
        let r = Region::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 6.0, 8.0));
        assert_relative_eq!(r.volume(), 60.0);
        assert_eq!(r.size(), Dimensions::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_touching_faces_do_not_intersect() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        let b = cube(1.0, 0.0, 0.0, 1.0);
        assert!(!a.intersects(&b));
        assert!(a.footprint_overlaps(&b));
    }

    #[test]
    fn test_partial_overlap_intersects() {
        let a = cube(0.0, 0.0, 0.0, 2.0);
        let b = cube(1.0, 1.0, 1.0, 2.0);
        assert!(a.intersects(&b));
        assert!(spans_overlap(0.0, 2.0, 1.0, 3.0));
        assert!(!spans_overlap(0.0, 1.0, 1.0, 2.0));
    }

    #[test]
    fn test_contains() {
        let outer = cube(0.0, 0.0, 0.0, 10.0);
        assert!(outer.contains(&cube(2.0, 2.0, 2.0, 3.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&cube(8.0, 0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_footprint_lanes() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        let side_by_side = cube(5.0, 1.0, 0.0, 1.0);
        assert!(!a.footprint_overlaps(&side_by_side));
    }

    #[test]
    fn test_degenerate() {
        let flat = Region::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 0.0));
        assert!(flat.is_degenerate());
        assert!(!cube(0.0, 0.0, 0.0, 1.0).is_degenerate());
    }
}
