//! # Truckload
//!
//! Places boxes in a truck so they can be unloaded in delivery order.
//!
//! ## Quick Start
//!
//! ```rust
//! use truckload::{pack_truck, CargoBox, Truck};
//!
//! let truck = Truck::new(10.0, 2.0, 2.0);
//! let boxes = vec![
//!     CargoBox::new("A", 4.0, 2.0, 2.0, 0),
//!     CargoBox::new("B", 6.0, 2.0, 2.0, 1),
//! ];
//!
//! let placement = pack_truck(&truck, &boxes)?;
//! assert_eq!(placement.len(), 2);
//! # Ok::<(), truckload::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support

/// Core types and traits.
pub use truckload_core as core;

/// The placement solver.
pub use truckload_packer as packer;

// Re-export commonly used types at root level
pub use truckload_core::{
    Config, Dimensions, Error, ErrorKind, Infeasibility, Orientation, Placement, PositionedBox,
    Result, SolveResult, Solver,
};
pub use truckload_packer::{pack_truck, CargoBox, OrientationConstraint, Truck, TruckPacker};
