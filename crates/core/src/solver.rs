//! Solver traits and configuration.

use crate::geometry::{Boundary, Geometry};
use crate::result::SolveResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search budget and execution settings.
///
/// Budgets bound the work done per root branch of the search, so a
/// solve always terminates. Running out of budget yields an infeasible
/// outcome, which means "not found", not "impossible".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Maximum committed placements per root branch.
    pub max_nodes: u64,

    /// How many levels above the deepest box reached a branch may revise.
    pub max_backtrack_depth: usize,

    /// Maximum candidate positions tried per box.
    pub max_candidates: usize,

    /// Maximum computation time in milliseconds (0 = unlimited).
    ///
    /// A non-zero limit makes the outcome depend on machine speed.
    pub time_limit_ms: u64,

    /// Number of threads to use for root branches (0 = auto, 1 = sequential).
    pub threads: usize,

    /// Reject inputs whose total box volume exceeds the truck volume.
    pub volume_precheck: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nodes: 100_000,
            max_backtrack_depth: 6,
            max_candidates: 8,
            time_limit_ms: 0,
            threads: 1,
            volume_precheck: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node budget per root branch.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Sets the backtracking window.
    pub fn with_max_backtrack_depth(mut self, depth: usize) -> Self {
        self.max_backtrack_depth = depth;
        self
    }

    /// Sets the number of candidates tried per box.
    pub fn with_max_candidates(mut self, candidates: usize) -> Self {
        self.max_candidates = candidates;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Enables or disables the volume pre-check.
    pub fn with_volume_precheck(mut self, enabled: bool) -> Self {
        self.volume_precheck = enabled;
        self
    }

    /// Checks that the budgets allow any search at all.
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 {
            return Err(Error::ConfigError("max_nodes must be at least 1".into()));
        }
        if self.max_candidates == 0 {
            return Err(Error::ConfigError(
                "max_candidates must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Progress callback for long-running operations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during solving.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Nodes expanded so far in the reporting branch.
    pub nodes_expanded: u64,
    /// Deepest number of boxes placed so far in the reporting branch.
    pub placed: usize,
    /// Number of boxes to place.
    pub total: usize,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the solver is still running.
    pub running: bool,
}

/// Trait for placement solvers.
pub trait Solver {
    /// The item type this solver places.
    type Geometry: Geometry;
    /// The container type this solver fills.
    type Boundary: Boundary;

    /// Solves the placement problem.
    fn solve(&self, geometries: &[Self::Geometry], boundary: &Self::Boundary)
        -> Result<SolveResult>;

    /// Solves with a progress callback.
    fn solve_with_progress(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<SolveResult>;

    /// Cancels an ongoing solve operation.
    fn cancel(&self);
}
