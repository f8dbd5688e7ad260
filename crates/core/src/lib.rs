//! # Truckload Core
//!
//! Core types and traits for the truckload placement engine.
//!
//! This crate provides the value types shared by the solver and its
//! callers: box and truck dimensions, orientations, regions, the
//! resulting placement, solver configuration and the error taxonomy.
//!
//! ## Core Components
//!
//! - **Geometry**: `Dimensions`, `Orientation`, `Region` and the `Geometry`/`Boundary` traits
//! - **Solver trait**: Common interface for placement solvers, with `Config` budgets
//! - **Results**: `Placement` (box id → offset) and `SolveResult`
//! - **Errors**: validation errors kept distinct from infeasibility
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod placement;
pub mod region;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, ErrorKind, Infeasibility, Result};
pub use geometry::{Boundary, BoxId, Dimensions, Geometry, Offset, Orientation, EPSILON};
pub use placement::{Placement, PlacementStats, PositionedBox};
pub use region::Region;
pub use result::{SearchStats, SolveResult};
pub use solver::{Config, ProgressCallback, ProgressInfo, Solver};
