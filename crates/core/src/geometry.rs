//! Dimensions, orientations and the geometry/boundary traits.

use crate::region::Region;
use crate::Result;
use nalgebra::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used for every geometric comparison.
pub const EPSILON: f64 = 1e-9;

/// Identifier of a box within one solve call.
pub type BoxId = String;

/// Minimum corner of a placed box in the truck frame.
pub type Offset = Vector3<f64>;

/// Extents of a box or truck as (length, width, height).
///
/// Length runs along the door axis (x), width along y, height along z.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dimensions {
    extents: Vector3<f64>,
}

impl Dimensions {
    /// Creates dimensions from length, width and height.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            extents: Vector3::new(length, width, height),
        }
    }

    /// Creates dimensions from a vector.
    pub fn from_vector(extents: Vector3<f64>) -> Self {
        Self { extents }
    }

    /// Returns the extents as a vector.
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.extents
    }

    /// Extent along the door axis.
    pub fn length(&self) -> f64 {
        self.extents.x
    }

    /// Extent along y.
    pub fn width(&self) -> f64 {
        self.extents.y
    }

    /// Extent along z.
    pub fn height(&self) -> f64 {
        self.extents.z
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.extents.x * self.extents.y * self.extents.z
    }

    /// Returns true if every extent is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.extents.iter().all(|e| e.is_finite() && *e > 0.0)
    }

    /// Returns the extents sorted ascending.
    pub fn sorted(&self) -> [f64; 3] {
        let mut values = [self.extents.x, self.extents.y, self.extents.z];
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    /// Returns the effective dimensions after applying an orientation.
    pub fn oriented(&self, orientation: Orientation) -> Dimensions {
        let [a, b, c] = orientation.axes();
        Dimensions::new(self.extents[a], self.extents[b], self.extents[c])
    }

    /// Returns true if `self` fits within `container` component-wise.
    pub fn fits_within(&self, container: &Dimensions) -> bool {
        self.extents
            .iter()
            .zip(container.extents.iter())
            .all(|(inner, outer)| *inner <= *outer + EPSILON)
    }

    /// Returns true if some axis permutation of `self` fits within `container`.
    pub fn fits_within_any_orientation(&self, container: &Dimensions) -> bool {
        let inner = self.sorted();
        let outer = container.sorted();
        inner
            .iter()
            .zip(outer.iter())
            .all(|(i, o)| *i <= *o + EPSILON)
    }

    /// Returns true if both have the same extents within [`EPSILON`].
    pub fn approx_eq(&self, other: &Dimensions) -> bool {
        (self.extents - other.extents).amax() <= EPSILON
    }
}

impl From<[f64; 3]> for Dimensions {
    fn from(values: [f64; 3]) -> Self {
        Dimensions::new(values[0], values[1], values[2])
    }
}

impl From<Dimensions> for [f64; 3] {
    fn from(dims: Dimensions) -> Self {
        [dims.length(), dims.width(), dims.height()]
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.length(), self.width(), self.height())
    }
}

/// One of the six axis permutations of a box.
///
/// The variant name lists which original extent ends up on the
/// x, y and z axis respectively (L = length, W = width, H = height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// As given.
    #[default]
    Lwh,
    /// Rotated 90° around x.
    Lhw,
    /// Rotated 90° around z.
    Wlh,
    /// Rotated around x then z.
    Whl,
    /// Rotated 90° around y.
    Hlw,
    /// Rotated around y then x.
    Hwl,
}

impl Orientation {
    /// All orientations in their canonical order.
    pub const ALL: [Orientation; 6] = [
        Orientation::Lwh,
        Orientation::Lhw,
        Orientation::Wlh,
        Orientation::Whl,
        Orientation::Hlw,
        Orientation::Hwl,
    ];

    /// Source axis for each of (x, y, z).
    pub fn axes(self) -> [usize; 3] {
        match self {
            Orientation::Lwh => [0, 1, 2],
            Orientation::Lhw => [0, 2, 1],
            Orientation::Wlh => [1, 0, 2],
            Orientation::Whl => [1, 2, 0],
            Orientation::Hlw => [2, 0, 1],
            Orientation::Hwl => [2, 1, 0],
        }
    }

    /// Position in [`Orientation::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true for every orientation other than the identity.
    pub fn is_rotated(self) -> bool {
        self != Orientation::Lwh
    }

    /// Returns true if the height axis stays vertical.
    pub fn is_upright(self) -> bool {
        self.axes()[2] == 2
    }
}

/// Trait for items that can be placed.
pub trait Geometry {
    /// Returns the unique identifier.
    fn id(&self) -> &str;

    /// Returns the volume.
    fn measure(&self) -> f64;

    /// Checks structural validity.
    fn validate(&self) -> Result<()>;
}

/// Trait for containers that items are placed into.
pub trait Boundary {
    /// Returns the volume.
    fn measure(&self) -> f64;

    /// Checks structural validity.
    fn validate(&self) -> Result<()>;

    /// Returns true if the region lies fully inside the container.
    fn contains_region(&self, region: &Region) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volume() {
        let dims = Dimensions::new(10.0, 20.0, 30.0);
        assert_relative_eq!(dims.volume(), 6000.0, epsilon = 0.001);
    }

    #[test]
    fn test_validity() {
        assert!(Dimensions::new(1.0, 2.0, 3.0).is_valid());
        assert!(!Dimensions::new(0.0, 2.0, 3.0).is_valid());
        assert!(!Dimensions::new(1.0, -2.0, 3.0).is_valid());
        assert!(!Dimensions::new(1.0, f64::NAN, 3.0).is_valid());
        assert!(!Dimensions::new(f64::INFINITY, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_oriented() {
        let dims = Dimensions::new(1.0, 2.0, 3.0);
        assert_eq!(dims.oriented(Orientation::Lwh), dims);
        assert_eq!(dims.oriented(Orientation::Lhw), Dimensions::new(1.0, 3.0, 2.0));
        assert_eq!(dims.oriented(Orientation::Whl), Dimensions::new(2.0, 3.0, 1.0));
        assert_eq!(dims.oriented(Orientation::Hwl), Dimensions::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_orientation_order() {
        for (i, o) in Orientation::ALL.iter().enumerate() {
            assert_eq!(o.index(), i);
        }
        assert!(!Orientation::Lwh.is_rotated());
        assert!(Orientation::Wlh.is_upright());
        assert!(!Orientation::Lhw.is_upright());
    }

    #[test]
    fn test_fits_any_orientation() {
        let truck = Dimensions::new(5.0, 5.0, 5.0);
        assert!(!Dimensions::new(6.0, 1.0, 1.0).fits_within_any_orientation(&truck));

        let truck = Dimensions::new(10.0, 2.0, 3.0);
        let long = Dimensions::new(2.0, 10.0, 3.0);
        assert!(!long.fits_within(&truck));
        assert!(long.fits_within_any_orientation(&truck));
    }
}
