//! Truck loading solver.

use crate::boundary::Truck;
use crate::geometry::CargoBox;
use crate::packing_utils::{build_placement, packing_utilization, verify_placement};
use crate::search::PlacementSearch;
use crate::validate::validate_problem;
use truckload_core::geometry::{Boundary, Geometry, EPSILON};
use truckload_core::solver::{Config, ProgressCallback, ProgressInfo, Solver};
use truckload_core::{Error, Infeasibility, Placement, Result, SolveResult};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Places boxes in a truck so that every box can be unloaded in route order.
pub struct TruckPacker {
    config: Config,
    cancelled: Arc<AtomicBool>,
}

impl TruckPacker {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a flag that stops a running solve when set.
    ///
    /// The flag is cleared at the start of every solve.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Computes a placement for `boxes`, discarding search statistics.
    pub fn pack(&self, truck: &Truck, boxes: &[CargoBox]) -> Result<Placement> {
        self.solve(boxes, truck).map(SolveResult::into_placement)
    }

    fn run(
        &self,
        boxes: &[CargoBox],
        truck: &Truck,
        callback: Option<&ProgressCallback>,
    ) -> Result<SolveResult> {
        let start = Instant::now();
        self.cancelled.store(false, Ordering::Relaxed);

        self.config.validate()?;
        validate_problem(truck, boxes)?;

        if boxes.is_empty() {
            let mut result = SolveResult::new(Placement::empty());
            result.computation_time_ms = start.elapsed().as_millis() as u64;
            return Ok(result);
        }

        if self.config.volume_precheck {
            let required: f64 = boxes.iter().map(|b| b.measure()).sum();
            let available = truck.measure();
            if required > available + EPSILON * available.max(1.0) {
                log::debug!(
                    "box volume {:.3} exceeds truck volume {:.3}",
                    required,
                    available
                );
                return Err(Error::Infeasible(Infeasibility::VolumeExceeded {
                    required,
                    available,
                }));
            }
        }

        let search = PlacementSearch::new(*truck.dimensions(), boxes, &self.config, &self.cancelled);
        let search = match callback {
            Some(cb) => search.with_progress(&**cb),
            None => search,
        };
        let outcome = search.run()?;

        let placement = build_placement(truck, boxes, &outcome.committed);
        verify_placement(truck, boxes, &placement)
            .map_err(|v| Error::Internal(format!("search produced an invalid placement: {}", v)))?;

        let utilization = packing_utilization(&placement, truck);
        let mut result = SolveResult::new(placement);
        result.utilization = utilization;
        result.stats = outcome.stats;
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "loaded {} boxes at {} in {} ms",
            result.placed_count(),
            result.utilization_percent(),
            result.computation_time_ms
        );

        if let Some(cb) = callback {
            cb(ProgressInfo {
                nodes_expanded: result.stats.nodes_expanded,
                placed: result.placed_count(),
                total: boxes.len(),
                elapsed_ms: result.computation_time_ms,
                running: false,
            });
        }

        Ok(result)
    }
}

impl Default for TruckPacker {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Solver for TruckPacker {
    type Geometry = CargoBox;
    type Boundary = Truck;

    fn solve(&self, geometries: &[Self::Geometry], boundary: &Self::Boundary) -> Result<SolveResult> {
        self.run(geometries, boundary, None)
    }

    fn solve_with_progress(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<SolveResult> {
        self.run(geometries, boundary, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OrientationConstraint;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::sync::Mutex;

    #[test]
    fn test_two_boxes_one_lane() {
        let truck = Truck::new(10.0, 2.0, 2.0);
        let boxes = vec![
            CargoBox::new("A", 4.0, 2.0, 2.0, 0),
            CargoBox::new("B", 6.0, 2.0, 2.0, 1),
        ];

        let placement = TruckPacker::default_config().pack(&truck, &boxes).unwrap();

        assert_eq!(placement.offset("A"), Some(Vector3::new(0.0, 0.0, 0.0)));
        assert_eq!(placement.offset("B"), Some(Vector3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_empty_input() {
        let result = TruckPacker::default_config()
            .solve(&[], &Truck::new(1.0, 1.0, 1.0))
            .unwrap();
        assert!(result.placement.is_empty());
        assert_eq!(result.utilization, 0.0);
    }

    #[test]
    fn test_volume_precheck() {
        let truck = Truck::new(2.0, 2.0, 2.0);
        let boxes: Vec<CargoBox> = (0..9)
            .map(|i| CargoBox::new(format!("b{}", i), 1.0, 1.0, 1.0, 0))
            .collect();

        let err = TruckPacker::default_config().pack(&truck, &boxes).unwrap_err();
        match err {
            Error::Infeasible(Infeasibility::VolumeExceeded {
                required,
                available,
            }) => {
                assert_relative_eq!(required, 9.0);
                assert_relative_eq!(available, 8.0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_without_precheck_search_fails() {
        let truck = Truck::new(2.0, 2.0, 2.0);
        let boxes: Vec<CargoBox> = (0..9)
            .map(|i| CargoBox::new(format!("b{}", i), 1.0, 1.0, 1.0, 0))
            .collect();

        let packer = TruckPacker::new(Config::default().with_volume_precheck(false));
        let err = packer.pack(&truck, &boxes).unwrap_err();
        assert!(err.is_infeasible());
        assert!(!matches!(
            err,
            Error::Infeasible(Infeasibility::VolumeExceeded { .. })
        ));
    }

    #[test]
    fn test_full_cube() {
        let truck = Truck::new(2.0, 2.0, 2.0);
        let boxes: Vec<CargoBox> = (0..8)
            .map(|i| CargoBox::new(format!("b{}", i), 1.0, 1.0, 1.0, i % 3))
            .collect();

        let result = TruckPacker::default_config().solve(&boxes, &truck).unwrap();
        assert_eq!(result.placed_count(), 8);
        assert_relative_eq!(result.utilization, 1.0);
    }

    #[test]
    fn test_invalid_config() {
        let packer = TruckPacker::new(Config::default().with_max_candidates(0));
        let err = packer.pack(&Truck::new(1.0, 1.0, 1.0), &[]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_validation_precedes_search() {
        let truck = Truck::new(5.0, 5.0, 5.0);
        let boxes = vec![CargoBox::new("tall", 1.0, 1.0, 9.0, 0)
            .with_orientation(OrientationConstraint::Upright)];
        let err = TruckPacker::default_config().pack(&truck, &boxes).unwrap_err();
        assert_eq!(err, Error::OversizedBox { id: "tall".into() });
    }

    #[test]
    fn test_progress_reports_completion() {
        let truck = Truck::new(4.0, 2.0, 2.0);
        let boxes: Vec<CargoBox> = (0..4)
            .map(|i| CargoBox::new(format!("b{}", i), 1.0, 2.0, 2.0, i))
            .collect();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Box::new(move |info| {
            if let Ok(mut v) = sink.lock() {
                v.push(info);
            }
        });

        TruckPacker::default_config()
            .solve_with_progress(&boxes, &truck, callback)
            .unwrap();

        let seen = seen.lock().unwrap();
        let last = seen.last().unwrap();
        assert!(!last.running);
        assert_eq!(last.placed, 4);
        assert!(seen.iter().filter(|i| i.running).count() >= 1);
    }

    #[test]
    fn test_cancel_from_progress_callback() {
        let truck = Truck::new(4.0, 2.0, 2.0);
        let boxes: Vec<CargoBox> = (0..4)
            .map(|i| CargoBox::new(format!("b{}", i), 1.0, 2.0, 2.0, i))
            .collect();

        let packer = TruckPacker::default_config();
        let handle = packer.cancel_handle();
        let callback: ProgressCallback = Box::new(move |_| handle.store(true, Ordering::Relaxed));

        let err = packer
            .solve_with_progress(&boxes, &truck, callback)
            .unwrap_err();
        assert_eq!(err, Error::Cancelled);
    }
}
