//! Truck cargo space.

use truckload_core::geometry::{Boundary, Dimensions};
use truckload_core::region::Region;
use truckload_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The cargo envelope of a truck.
///
/// Its minimum corner is the origin of the coordinate frame. The door is
/// at `x = 0`; boxes further from the door have larger `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Truck {
    /// Dimensions (length, width, height).
    dimensions: Dimensions,
}

impl Truck {
    /// Creates a truck with the given dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            dimensions: Dimensions::new(length, width, height),
        }
    }

    /// Creates a truck from existing dimensions.
    pub fn from_dimensions(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }

    /// Returns the dimensions.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Returns the length along the door axis.
    pub fn length(&self) -> f64 {
        self.dimensions.length()
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.width()
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.height()
    }

    /// Returns the whole cargo space as a region.
    pub fn region(&self) -> Region {
        Region::from_size(&self.dimensions)
    }
}

impl Boundary for Truck {
    fn measure(&self) -> f64 {
        self.dimensions.volume()
    }

    fn validate(&self) -> Result<()> {
        if !self.dimensions.is_valid() {
            return Err(Error::InvalidTruck(format!(
                "All dimensions must be positive and finite, got {}",
                self.dimensions
            )));
        }
        Ok(())
    }

    fn contains_region(&self, region: &Region) -> bool {
        self.region().contains(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_truck_volume() {
        let truck = Truck::new(100.0, 80.0, 50.0);
        assert_relative_eq!(truck.measure(), 400000.0, epsilon = 0.001);
    }

    #[test]
    fn test_contains_region() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let inside = Region::new(Vector3::new(6.0, 0.0, 0.0), Vector3::new(10.0, 2.0, 2.0));
        let outside = Region::new(Vector3::new(7.0, 0.0, 0.0), Vector3::new(11.0, 2.0, 2.0));

        assert!(truck.contains_region(&inside));
        assert!(!truck.contains_region(&outside));
    }

    #[test]
    fn test_validation() {
        assert!(Truck::new(100.0, 80.0, 50.0).validate().is_ok());
        assert!(Truck::new(-100.0, 80.0, 50.0).validate().is_err());
        assert!(Truck::new(100.0, 0.0, 50.0).validate().is_err());
        assert!(Truck::new(f64::NAN, 1.0, 1.0).validate().is_err());
    }
}
