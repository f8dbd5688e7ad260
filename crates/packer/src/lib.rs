//! # Truckload Packer
//!
//! Order-respecting placement of boxes in a truck.
//!
//! Boxes carry a route order: the lower the order, the earlier the box
//! leaves the truck. The packer finds positions for every box such that a
//! box never has to pass through another box with a higher route order on
//! its way to the door at `x = 0`.
//!
//! ```
//! use truckload_packer::{pack_truck, CargoBox, Truck};
//!
//! let truck = Truck::new(10.0, 2.0, 2.0);
//! let boxes = vec![
//!     CargoBox::new("A", 4.0, 2.0, 2.0, 0),
//!     CargoBox::new("B", 6.0, 2.0, 2.0, 1),
//! ];
//!
//! let placement = pack_truck(&truck, &boxes).unwrap();
//! assert_eq!(placement.offset("A").unwrap().x, 0.0);
//! assert_eq!(placement.offset("B").unwrap().x, 4.0);
//! ```

pub mod boundary;
pub mod free_space;
pub mod geometry;
pub mod lane;
pub mod packer;
pub mod packing_utils;
pub mod search;
pub mod validate;

// Re-exports
pub use boundary::Truck;
pub use geometry::{CargoBox, OrientationConstraint};
pub use packer::TruckPacker;
pub use packing_utils::{verify_placement, Violation};
pub use validate::validate_problem;
pub use truckload_core::{Config, Error, Placement, Result, SolveResult};

/// Packs `boxes` into `truck` with the default configuration.
pub fn pack_truck(truck: &Truck, boxes: &[CargoBox]) -> Result<Placement> {
    TruckPacker::default_config().pack(truck, boxes)
}
