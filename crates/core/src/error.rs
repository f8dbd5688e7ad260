//! Error types for truckload.

use std::fmt;
use thiserror::Error;

/// Result type alias for truckload operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or solving a loading problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The truck envelope is malformed.
    #[error("Invalid truck: {0}")]
    InvalidTruck(String),

    /// A box is malformed.
    #[error("Invalid box: {0}")]
    InvalidBox(String),

    /// Two or more boxes share an identifier.
    #[error("Duplicate box id: {0}")]
    DuplicateBoxId(String),

    /// A box exceeds the truck under every allowed orientation.
    #[error("Box '{id}' does not fit inside the truck in any allowed orientation")]
    OversizedBox {
        /// Identifier of the offending box.
        id: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No placement was found.
    #[error("No placement found: {0}")]
    Infeasible(Infeasibility),

    /// Computation cancelled.
    #[error("Computation cancelled")]
    Cancelled,

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`Error`] values.
///
/// Callers use this to tell "the input was malformed" apart from
/// "no arrangement was found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-supplied data violates a structural precondition.
    Validation,
    /// The search did not produce a placement.
    Infeasible,
    /// Solver configuration is unusable.
    Config,
    /// The solve was cancelled.
    Cancelled,
    /// A bug in the solver.
    Internal,
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTruck(_)
            | Error::InvalidBox(_)
            | Error::DuplicateBoxId(_)
            | Error::OversizedBox { .. } => ErrorKind::Validation,
            Error::Infeasible(_) => ErrorKind::Infeasible,
            Error::ConfigError(_) => ErrorKind::Config,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns true for malformed-input errors.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns true when no placement was found.
    pub fn is_infeasible(&self) -> bool {
        self.kind() == ErrorKind::Infeasible
    }
}

/// Why the search gave up.
///
/// Only [`Infeasibility::VolumeExceeded`] is a proof that no placement
/// exists. The other variants mean "not found within budget".
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// Total box volume is larger than the truck volume.
    VolumeExceeded {
        /// Sum of box volumes.
        required: f64,
        /// Truck volume.
        available: f64,
    },
    /// The node budget ran out.
    BudgetExhausted {
        /// Nodes expanded across all branches.
        nodes: u64,
    },
    /// The bounded search tree was exhausted.
    SearchExhausted {
        /// Most boxes placed by any branch.
        placed: usize,
        /// Number of boxes requested.
        total: usize,
    },
    /// The wall-clock limit was reached.
    TimeLimit {
        /// Configured limit in milliseconds.
        ms: u64,
    },
}

impl Infeasibility {
    /// Returns true if this outcome proves that no placement exists.
    pub fn is_proof(&self) -> bool {
        matches!(self, Infeasibility::VolumeExceeded { .. })
    }
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::VolumeExceeded {
                required,
                available,
            } => write!(
                f,
                "total box volume {required} exceeds truck volume {available}"
            ),
            Infeasibility::BudgetExhausted { nodes } => {
                write!(f, "search budget exhausted after {nodes} nodes")
            }
            Infeasibility::SearchExhausted { placed, total } => {
                write!(f, "search exhausted with at most {placed} of {total} boxes placed")
            }
            Infeasibility::TimeLimit { ms } => write!(f, "time limit of {ms}ms reached"),
        }
    }
}
