//! Problem and placement types in their JSON shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use truckload_core::Placement;
use truckload_packer::{CargoBox, OrientationConstraint, Truck};

/// A loading problem: a truck and the boxes to put in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Truck dimensions (length, width, height).
    pub truck: [f64; 3],
    /// Boxes to load
    pub boxes: Vec<BoxSpec>,
}

/// A box as given in a problem file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub box_id: String,
    /// Nominal size (length, width, height).
    pub size: [f64; 3],
    /// Lower orders are delivered first.
    pub route_order: i64,
    /// Allowed rotations: `any` (default), `upright` or `fixed`.
    #[serde(default)]
    pub orientation: OrientationConstraint,
}

impl BoxSpec {
    /// Creates a box specification that may be rotated freely.
    pub fn new(box_id: impl Into<String>, size: [f64; 3], route_order: i64) -> Self {
        Self {
            box_id: box_id.into(),
            size,
            route_order,
            orientation: OrientationConstraint::Any,
        }
    }

    /// Restricts the rotations.
    pub fn with_orientation(mut self, orientation: OrientationConstraint) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Summary figures for a problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInfo {
    /// Number of boxes
    pub boxes: usize,
    /// Number of distinct route orders
    pub stops: usize,
    /// Total box volume over truck volume
    pub fill_ratio: f64,
}

impl Problem {
    /// Creates a problem.
    pub fn new(truck: [f64; 3], boxes: Vec<BoxSpec>) -> Self {
        Self { truck, boxes }
    }

    /// Returns the truck for the solver.
    pub fn truck(&self) -> Truck {
        Truck::new(self.truck[0], self.truck[1], self.truck[2])
    }

    /// Returns the boxes for the solver, in file order.
    pub fn cargo(&self) -> Vec<CargoBox> {
        self.boxes
            .iter()
            .map(|b| {
                CargoBox::new(b.box_id.clone(), b.size[0], b.size[1], b.size[2], b.route_order)
                    .with_orientation(b.orientation)
            })
            .collect()
    }

    /// Sum of box volumes.
    pub fn total_box_volume(&self) -> f64 {
        self.boxes.iter().map(|b| b.size.iter().product::<f64>()).sum()
    }

    /// Returns problem information.
    pub fn info(&self) -> ProblemInfo {
        let truck_volume: f64 = self.truck.iter().product();
        let stops: BTreeSet<i64> = self.boxes.iter().map(|b| b.route_order).collect();
        ProblemInfo {
            boxes: self.boxes.len(),
            stops: stops.len(),
            fill_ratio: if truck_volume > 0.0 {
                self.total_box_volume() / truck_volume
            } else {
                0.0
            },
        }
    }
}

/// A placed box in the output shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBoxSpec {
    pub box_id: String,
    /// Effective size after rotation.
    pub size: [f64; 3],
    /// Minimum corner in the truck.
    pub offset: [f64; 3],
}

/// Solver output in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingReport {
    pub boxes: Vec<PlacedBoxSpec>,
}

impl PackingReport {
    /// Builds a report from a placement.
    pub fn from_placement(placement: &Placement) -> Self {
        let boxes = placement
            .iter()
            .map(|pb| PlacedBoxSpec {
                box_id: pb.box_id.clone(),
                size: pb.size.into(),
                offset: [pb.offset.x, pb.offset.y, pb.offset.z],
            })
            .collect();
        Self { boxes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_box_problem() -> Problem {
        Problem::new(
            [10.0, 2.0, 2.0],
            vec![
                BoxSpec::new("A", [4.0, 2.0, 2.0], 0),
                BoxSpec::new("B", [6.0, 2.0, 2.0], 1),
            ],
        )
    }

    #[test]
    fn test_info() {
        let info = two_box_problem().info();
        assert_eq!(info.boxes, 2);
        assert_eq!(info.stops, 2);
        assert_relative_eq!(info.fill_ratio, 1.0);
    }

    #[test]
    fn test_cargo_keeps_order() {
        let cargo = two_box_problem().cargo();
        assert_eq!(cargo[0].route_order(), 0);
        assert_eq!(cargo[1].dimensions().length(), 6.0);
    }

    #[test]
    fn test_cargo_carries_orientation() {
        let problem = Problem::new(
            [10.0, 2.0, 2.0],
            vec![BoxSpec::new("pole", [1.0, 1.0, 8.0], 0)
                .with_orientation(OrientationConstraint::Upright)],
        );
        let cargo = problem.cargo();
        assert_eq!(cargo[0].orientation_constraint(), OrientationConstraint::Upright);

        // Upright keeps the pole standing, and it is taller than the truck.
        let err = truckload_packer::pack_truck(&problem.truck(), &cargo).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_report_from_placement() {
        let problem = two_box_problem();
        let placement = truckload_packer::pack_truck(&problem.truck(), &problem.cargo()).unwrap();
        let report = PackingReport::from_placement(&placement);

        assert_eq!(report.boxes.len(), 2);
        assert_eq!(report.boxes[0].box_id, "A");
        assert_eq!(report.boxes[0].offset, [0.0, 0.0, 0.0]);
        assert_eq!(report.boxes[1].offset, [4.0, 0.0, 0.0]);
    }
}
