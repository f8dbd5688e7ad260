//! Cargo box geometry.

use truckload_core::geometry::{Dimensions, Geometry, Orientation};
use truckload_core::{BoxId, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation constraint for a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrientationConstraint {
    /// Any orientation allowed (6 axis-aligned rotations).
    #[default]
    Any,
    /// Only upright orientations (2 rotations: original and 90° around the vertical axis).
    Upright,
    /// Fixed orientation (no rotation allowed).
    Fixed,
}

/// A box to be loaded, with its delivery position on the route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoBox {
    /// Unique identifier.
    id: BoxId,

    /// Dimensions (length, width, height).
    dimensions: Dimensions,

    /// Delivery sequence; lower values are unloaded earlier.
    route_order: i64,

    /// Orientation constraint.
    orientation: OrientationConstraint,
}

impl CargoBox {
    /// Creates a new box with the given ID, dimensions and route order.
    pub fn new(
        id: impl Into<BoxId>,
        length: f64,
        width: f64,
        height: f64,
        route_order: i64,
    ) -> Self {
        Self::with_dimensions(id, Dimensions::new(length, width, height), route_order)
    }

    /// Creates a new box from existing dimensions.
    pub fn with_dimensions(id: impl Into<BoxId>, dimensions: Dimensions, route_order: i64) -> Self {
        Self {
            id: id.into(),
            dimensions,
            route_order,
            orientation: OrientationConstraint::default(),
        }
    }

    /// Sets the orientation constraint.
    pub fn with_orientation(mut self, constraint: OrientationConstraint) -> Self {
        self.orientation = constraint;
        self
    }

    /// Returns the dimensions as given.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Returns the route order.
    pub fn route_order(&self) -> i64 {
        self.route_order
    }

    /// Returns the orientation constraint.
    pub fn orientation_constraint(&self) -> OrientationConstraint {
        self.orientation
    }

    /// Returns the allowed orientations based on the constraint.
    pub fn allowed_orientations(&self) -> &'static [Orientation] {
        match self.orientation {
            OrientationConstraint::Fixed => &[Orientation::Lwh],
            OrientationConstraint::Upright => &[Orientation::Lwh, Orientation::Wlh],
            OrientationConstraint::Any => &Orientation::ALL,
        }
    }

    /// Returns the allowed orientations that yield distinct effective dimensions.
    ///
    /// When two orientations coincide (square faces, cubes) the one that
    /// comes first is kept.
    pub fn distinct_orientations(&self) -> Vec<(Orientation, Dimensions)> {
        let mut distinct: Vec<(Orientation, Dimensions)> = Vec::with_capacity(6);
        for &orientation in self.allowed_orientations() {
            let dims = self.dimensions.oriented(orientation);
            if !distinct.iter().any(|(_, seen)| seen.approx_eq(&dims)) {
                distinct.push((orientation, dims));
            }
        }
        distinct
    }

    /// Returns true if some allowed orientation fits inside `container`.
    pub fn fits_in(&self, container: &Dimensions) -> bool {
        match self.orientation {
            OrientationConstraint::Any => self.dimensions.fits_within_any_orientation(container),
            _ => self
                .allowed_orientations()
                .iter()
                .any(|&o| self.dimensions.oriented(o).fits_within(container)),
        }
    }
}

impl Geometry for CargoBox {
    fn id(&self) -> &str {
        &self.id
    }

    fn measure(&self) -> f64 {
        self.dimensions.volume()
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidBox("Box id must not be empty".into()));
        }

        if !self.dimensions.is_valid() {
            return Err(Error::InvalidBox(format!(
                "All dimensions for '{}' must be positive and finite, got {}",
                self.id, self.dimensions
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_volume() {
        let b = CargoBox::new("B1", 10.0, 20.0, 30.0, 0);
        assert_relative_eq!(b.measure(), 6000.0, epsilon = 0.001);
    }

    #[test]
    fn test_orientations() {
        let b = CargoBox::new("B1", 10.0, 20.0, 30.0, 0);
        assert_eq!(b.allowed_orientations().len(), 6);

        let upright = b.clone().with_orientation(OrientationConstraint::Upright);
        assert_eq!(upright.allowed_orientations().len(), 2);

        let fixed = b.with_orientation(OrientationConstraint::Fixed);
        assert_eq!(fixed.allowed_orientations().len(), 1);
    }

    #[test]
    fn test_distinct_orientations() {
        let cube = CargoBox::new("C", 2.0, 2.0, 2.0, 0);
        assert_eq!(cube.distinct_orientations().len(), 1);

        let square = CargoBox::new("S", 4.0, 2.0, 2.0, 0);
        let distinct = square.distinct_orientations();
        assert_eq!(distinct.len(), 3);
        assert_eq!(distinct[0].0, Orientation::Lwh);

        let plain = CargoBox::new("P", 1.0, 2.0, 3.0, 0);
        assert_eq!(plain.distinct_orientations().len(), 6);
    }

    #[test]
    fn test_fits_in_respects_constraint() {
        let truck = Dimensions::new(10.0, 2.0, 3.0);
        let b = CargoBox::new("B", 2.0, 10.0, 3.0, 0);
        assert!(b.fits_in(&truck));

        let upright = b.clone().with_orientation(OrientationConstraint::Upright);
        assert!(upright.fits_in(&truck));

        let fixed = b.with_orientation(OrientationConstraint::Fixed);
        assert!(!fixed.fits_in(&truck));
    }

    #[test]
    fn test_validation() {
        assert!(CargoBox::new("B1", 10.0, 20.0, 30.0, 0).validate().is_ok());
        assert!(CargoBox::new("B2", -10.0, 20.0, 30.0, 0).validate().is_err());
        assert!(CargoBox::new("B3", 10.0, 0.0, 30.0, 0).validate().is_err());
        assert!(CargoBox::new("", 1.0, 1.0, 1.0, 0).validate().is_err());
    }
}
