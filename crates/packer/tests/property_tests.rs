//! Property-Based Tests
//!
//! Random small loading problems checked against the placement invariants:
//! - Containment and non-overlap of every returned placement
//! - Door order between boxes with overlapping footprints
//! - Oversized boxes are rejected by validation
//! - Repeated solves return the same placement

use proptest::prelude::*;
use truckload_core::{Config, ErrorKind, Placement};
use truckload_packer::{CargoBox, Truck, TruckPacker};

fn packer() -> TruckPacker {
    TruckPacker::new(Config::default().with_max_nodes(2_000))
}

fn problem() -> impl Strategy<Value = (Truck, Vec<CargoBox>)> {
    let truck = (2u32..=6, 1u32..=4, 1u32..=3);
    let boxes = prop::collection::vec((1u32..=3, 1u32..=2, 1u32..=2, 0i64..4), 0..7);
    (truck, boxes).prop_map(|((l, w, h), specs)| {
        let truck = Truck::new(l as f64, w as f64, h as f64);
        let boxes = specs
            .into_iter()
            .enumerate()
            .map(|(i, (bl, bw, bh, order))| {
                CargoBox::new(format!("b{}", i), bl as f64, bw as f64, bh as f64, order)
            })
            .collect();
        (truck, boxes)
    })
}

fn check_invariants(truck: &Truck, placement: &Placement) -> Result<(), TestCaseError> {
    let bounds = truck.region();
    for pb in placement.iter() {
        prop_assert!(bounds.contains(&pb.region()), "{} leaves the truck", pb.box_id);
    }

    let boxes = placement.boxes();
    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            prop_assert!(
                !a.region().intersects(&b.region()),
                "{} overlaps {}",
                a.box_id,
                b.box_id
            );
            if a.route_order != b.route_order && a.region().footprint_overlaps(&b.region()) {
                let (near, far) = if a.route_order < b.route_order { (a, b) } else { (b, a) };
                prop_assert!(
                    near.accessibility_interval().1 <= far.accessibility_interval().0 + 1e-9,
                    "{} blocks {}",
                    far.box_id,
                    near.box_id
                );
            }
        }
    }
    Ok(())
}

/// Property: every successful placement satisfies containment, overlap and order
#[test]
fn proptest_placements_are_valid() {
    proptest!(ProptestConfig::with_cases(64), |((truck, boxes) in problem())| {
        match packer().pack(&truck, &boxes) {
            Ok(placement) => {
                prop_assert_eq!(placement.len(), boxes.len());
                check_invariants(&truck, &placement)?;
            }
            Err(e) => {
                prop_assert!(
                    matches!(e.kind(), ErrorKind::Validation | ErrorKind::Infeasible),
                    "unexpected error: {}",
                    e
                );
            }
        }
    });
}

/// Property: a box longer than every truck side is a validation error
#[test]
fn proptest_oversized_is_validation_error() {
    proptest!(|((truck, mut boxes) in problem(), extra in 1u32..5)| {
        let longest = truck.dimensions().sorted()[2];
        boxes.push(CargoBox::new("oversized", longest + extra as f64, 1.0, 1.0, 0));

        let err = packer().pack(&truck, &boxes).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Validation);
    });
}

/// Property: identical input gives an identical outcome
#[test]
fn proptest_deterministic() {
    proptest!(ProptestConfig::with_cases(32), |((truck, boxes) in problem())| {
        let first = packer().pack(&truck, &boxes);
        let second = packer().pack(&truck, &boxes);
        prop_assert_eq!(first, second);
    });
}
