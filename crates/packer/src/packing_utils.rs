//! Shared utilities for turning search output into a checked placement.
//!
//! # Extracted Components
//!
//! - [`build_placement`]: Maps committed boxes from the load frame to the truck frame
//! - [`verify_placement`]: Independent check of containment, overlap and order
//! - [`packing_utilization`]: Volume ratio of a placement

use crate::boundary::Truck;
use crate::geometry::CargoBox;
use crate::lane::LaneIndex;
use crate::search::Committed;
use nalgebra::Vector3;
use std::fmt;
use truckload_core::geometry::{Boundary, Geometry, EPSILON};
use truckload_core::placement::{Placement, PositionedBox};

/// A broken placement invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A box is missing from the placement.
    Missing(String),
    /// A box sticks out of the truck.
    OutOfBounds(String),
    /// Two boxes share positive volume.
    Overlap(String, String),
    /// A box blocks another box that leaves the truck earlier.
    OrderViolation {
        /// Box with the lower route order.
        earlier: String,
        /// Box with the higher route order that is not behind it.
        later: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing(id) => write!(f, "box '{}' was not placed", id),
            Violation::OutOfBounds(id) => write!(f, "box '{}' is outside the truck", id),
            Violation::Overlap(a, b) => write!(f, "boxes '{}' and '{}' overlap", a, b),
            Violation::OrderViolation { earlier, later } => write!(
                f,
                "box '{}' blocks box '{}' on the way to the door",
                later, earlier
            ),
        }
    }
}

/// Converts committed boxes to a placement in input order.
///
/// The search measures depth from the back wall; the truck frame measures
/// `x` from the door, so `x = L - depth - length`, clamped at zero.
pub fn build_placement(truck: &Truck, boxes: &[CargoBox], committed: &[Committed]) -> Placement {
    let mut slots: Vec<Option<&Committed>> = vec![None; boxes.len()];
    for c in committed {
        if let Some(slot) = slots.get_mut(c.item) {
            *slot = Some(c);
        }
    }

    let positioned = slots
        .into_iter()
        .zip(boxes)
        .filter_map(|(slot, cargo)| {
            let c = slot?;
            let size = c.candidate.size;
            let depth = c.candidate.position.x;
            let x = (truck.length() - depth - size.length()).max(0.0);
            Some(PositionedBox {
                box_id: cargo.id().to_string(),
                size,
                offset: Vector3::new(x, c.candidate.position.y, c.candidate.position.z),
                orientation: c.candidate.orientation,
                route_order: cargo.route_order(),
            })
        })
        .collect();

    Placement::new(positioned)
}

/// Checks a placement against the truck and the boxes it should hold.
///
/// Verifies that every box is present with a permutation of its own
/// dimensions and lies inside the truck. Boxes sharing a footprint must form
/// lanes whose route orders never increase towards the door. Across lanes,
/// no two boxes may overlap, and no box with a lower route order may sit
/// behind an overlapping-footprint box with a higher one.
pub fn verify_placement(
    truck: &Truck,
    boxes: &[CargoBox],
    placement: &Placement,
) -> Result<(), Violation> {
    let mut placed = Vec::with_capacity(boxes.len());
    for cargo in boxes {
        let pb = placement
            .get(cargo.id())
            .ok_or_else(|| Violation::Missing(cargo.id().to_string()))?;
        let same_box = pb
            .size
            .sorted()
            .iter()
            .zip(cargo.dimensions().sorted())
            .all(|(a, b)| (a - b).abs() <= EPSILON);
        if !same_box || !truck.contains_region(&pb.region()) {
            return Err(Violation::OutOfBounds(cargo.id().to_string()));
        }
        placed.push(pb);
    }

    let mut lanes = LaneIndex::new();
    for (item, pb) in placed.iter().enumerate() {
        let mut region = pb.region();
        let door_side = region.min.x;
        region.min.x = truck.length() - region.max.x;
        region.max.x = truck.length() - door_side;
        lanes.insert(&region, item, pb.route_order);
    }
    if let Some((deeper, nearer)) = lanes.lanes().iter().find_map(|lane| lane.inversion()) {
        return Err(Violation::OrderViolation {
            earlier: placed[deeper.item].box_id.clone(),
            later: placed[nearer.item].box_id.clone(),
        });
    }

    for (i, a) in placed.iter().enumerate() {
        let ra = a.region();
        for b in &placed[i + 1..] {
            let rb = b.region();
            if ra.intersects(&rb) {
                return Err(Violation::Overlap(a.box_id.clone(), b.box_id.clone()));
            }
            if a.route_order == b.route_order || !ra.footprint_overlaps(&rb) {
                continue;
            }
            let (earlier, later) = if a.route_order < b.route_order {
                (a, b)
            } else {
                (b, a)
            };
            let (_, earlier_end) = earlier.accessibility_interval();
            let (later_start, _) = later.accessibility_interval();
            if earlier_end > later_start + EPSILON {
                return Err(Violation::OrderViolation {
                    earlier: earlier.box_id.clone(),
                    later: later.box_id.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Occupied volume over truck volume.
pub fn packing_utilization(placement: &Placement, truck: &Truck) -> f64 {
    let capacity = truck.measure();
    if capacity <= 0.0 {
        return 0.0;
    }
    placement.occupied_volume() / capacity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Candidate;
    use truckload_core::geometry::{Dimensions, Orientation};

    fn positioned(id: &str, x: f64, y: f64, z: f64, size: [f64; 3], order: i64) -> PositionedBox {
        PositionedBox {
            box_id: id.to_string(),
            size: Dimensions::from(size),
            offset: Vector3::new(x, y, z),
            orientation: Orientation::Lwh,
            route_order: order,
        }
    }

    #[test]
    fn test_build_placement_flips_door_axis() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![
            CargoBox::new("A", 4.0, 2.0, 2.0, 0),
            CargoBox::new("B", 6.0, 2.0, 2.0, 1),
        ];
        let committed = vec![
            Committed {
                item: 1,
                candidate: Candidate {
                    position: Vector3::zeros(),
                    orientation: Orientation::Lwh,
                    size: Dimensions::new(6.0, 2.0, 2.0),
                },
            },
            Committed {
                item: 0,
                candidate: Candidate {
                    position: Vector3::new(6.0, 0.0, 0.0),
                    orientation: Orientation::Lwh,
                    size: Dimensions::new(4.0, 2.0, 2.0),
                },
            },
        ];

        let placement = build_placement(&truck, &boxes, &committed);
        assert_eq!(placement.boxes()[0].box_id, "A");
        assert_eq!(placement.offset("A"), Some(Vector3::zeros()));
        assert_eq!(placement.offset("B"), Some(Vector3::new(4.0, 0.0, 0.0)));
        assert!(verify_placement(&truck, &boxes, &placement).is_ok());
    }

    #[test]
    fn test_detects_missing_box() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![CargoBox::new("A", 1.0, 1.0, 1.0, 0)];
        assert_eq!(
            verify_placement(&truck, &boxes, &Placement::empty()),
            Err(Violation::Missing("A".into()))
        );
    }

    #[test]
    fn test_detects_out_of_bounds() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![CargoBox::new("A", 4.0, 2.0, 2.0, 0)];
        let placement = Placement::new(vec![positioned("A", 7.0, 0.0, 0.0, [4.0, 2.0, 2.0], 0)]);
        assert_eq!(
            verify_placement(&truck, &boxes, &placement),
            Err(Violation::OutOfBounds("A".into()))
        );
    }

    #[test]
    fn test_detects_wrong_size() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![CargoBox::new("A", 4.0, 2.0, 2.0, 0)];
        let placement = Placement::new(vec![positioned("A", 0.0, 0.0, 0.0, [3.0, 2.0, 2.0], 0)]);
        assert!(verify_placement(&truck, &boxes, &placement).is_err());
    }

    #[test]
    fn test_detects_overlap() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![
            CargoBox::new("A", 4.0, 2.0, 2.0, 0),
            CargoBox::new("B", 4.0, 2.0, 2.0, 0),
        ];
        let placement = Placement::new(vec![
            positioned("A", 0.0, 0.0, 0.0, [4.0, 2.0, 2.0], 0),
            positioned("B", 3.0, 0.0, 0.0, [4.0, 2.0, 2.0], 0),
        ]);
        assert_eq!(
            verify_placement(&truck, &boxes, &placement),
            Err(Violation::Overlap("A".into(), "B".into()))
        );
    }

    #[test]
    fn test_detects_order_violation() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![
            CargoBox::new("A", 4.0, 2.0, 2.0, 0),
            CargoBox::new("B", 6.0, 2.0, 2.0, 1),
        ];
        // A leaves first but sits behind B.
        let placement = Placement::new(vec![
            positioned("A", 6.0, 0.0, 0.0, [4.0, 2.0, 2.0], 0),
            positioned("B", 0.0, 0.0, 0.0, [6.0, 2.0, 2.0], 1),
        ]);
        let err = verify_placement(&truck, &boxes, &placement).unwrap_err();
        assert_eq!(
            err,
            Violation::OrderViolation {
                earlier: "A".into(),
                later: "B".into()
            }
        );
        assert!(err.to_string().contains("blocks"));
    }

    #[test]
    fn test_side_by_side_lanes_are_unordered() {
        let truck = Truck::new(10.0, 4.0, 2.0);
        let boxes = vec![
            CargoBox::new("A", 4.0, 2.0, 2.0, 0),
            CargoBox::new("B", 6.0, 2.0, 2.0, 1),
        ];
        let placement = Placement::new(vec![
            positioned("A", 6.0, 0.0, 0.0, [4.0, 2.0, 2.0], 0),
            positioned("B", 0.0, 2.0, 0.0, [6.0, 2.0, 2.0], 1),
        ]);
        assert!(verify_placement(&truck, &boxes, &placement).is_ok());
    }

    #[test]
    fn test_stacked_lane_inversion() {
        // Same footprint: C leaves first but is stacked behind D.
        let truck = Truck::new(6.0, 1.0, 1.0);
        let boxes = vec![
            CargoBox::new("C", 2.0, 1.0, 1.0, 0),
            CargoBox::new("D", 2.0, 1.0, 1.0, 3),
            CargoBox::new("E", 2.0, 1.0, 1.0, 3),
        ];
        let placement = Placement::new(vec![
            positioned("C", 4.0, 0.0, 0.0, [2.0, 1.0, 1.0], 0),
            positioned("D", 2.0, 0.0, 0.0, [2.0, 1.0, 1.0], 3),
            positioned("E", 0.0, 0.0, 0.0, [2.0, 1.0, 1.0], 3),
        ]);
        assert_eq!(
            verify_placement(&truck, &boxes, &placement),
            Err(Violation::OrderViolation {
                earlier: "C".into(),
                later: "D".into()
            })
        );
    }

    #[test]
    fn test_packing_utilization() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let placement = Placement::new(vec![
            positioned("A", 0.0, 0.0, 0.0, [4.0, 2.0, 2.0], 0),
            positioned("B", 4.0, 0.0, 0.0, [6.0, 2.0, 2.0], 1),
        ]);
        assert!((packing_utilization(&placement, &truck) - 1.0).abs() < 1e-10);
        assert_eq!(packing_utilization(&Placement::empty(), &truck), 0.0);
    }
}
