//! Structural validation of a loading problem.
//!
//! Runs before any search. A failure here is always a validation error and
//! never an infeasibility.

use crate::boundary::Truck;
use crate::geometry::CargoBox;
use std::collections::HashSet;
use truckload_core::geometry::{Boundary, Geometry};
use truckload_core::{Error, Result};

/// Checks the truck and boxes, failing on the first violation.
///
/// Checks run in this order: truck dimensions, each box's id and
/// dimensions, duplicate ids, then whether each box fits the truck under
/// some allowed orientation. An empty box list is valid.
pub fn validate_problem(truck: &Truck, boxes: &[CargoBox]) -> Result<()> {
    truck.validate()?;

    for b in boxes {
        b.validate()?;
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(boxes.len());
    for b in boxes {
        if !seen.insert(b.id()) {
            return Err(Error::DuplicateBoxId(b.id().to_string()));
        }
    }

    for b in boxes {
        if !b.fits_in(truck.dimensions()) {
            log::debug!(
                "box '{}' ({}) cannot fit truck {}",
                b.id(),
                b.dimensions(),
                truck.dimensions()
            );
            return Err(Error::OversizedBox {
                id: b.id().to_string(),
            });
        }
    }

    Ok(())
}
