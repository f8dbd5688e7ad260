//! Solve result representation.

use crate::placement::{Placement, PlacementStats};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Committed placements across all explored branches.
    pub nodes_expanded: u64,
    /// Placements undone.
    pub backtracks: u64,
    /// Root branches explored.
    pub branches: usize,
    /// Footprint lanes in the returned placement.
    pub lanes: usize,
}

/// Result of a successful solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult {
    /// Positions for every input box.
    pub placement: Placement,

    /// Utilization ratio (0.0 - 1.0).
    /// Calculated as: total_box_volume / truck_volume
    pub utilization: f64,

    /// Search counters.
    pub stats: SearchStats,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl SolveResult {
    /// Creates a result for a placement.
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            utilization: 0.0,
            stats: SearchStats::default(),
            computation_time_ms: 0,
        }
    }

    /// Returns the number of placed boxes.
    pub fn placed_count(&self) -> usize {
        self.placement.len()
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        self.placement.stats()
    }

    /// Consumes the result, returning the placement.
    pub fn into_placement(self) -> Placement {
        self.placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_new() {
        let result = SolveResult::new(Placement::empty());
        assert_eq!(result.placed_count(), 0);
        assert_eq!(result.utilization, 0.0);
        assert_eq!(result.stats, SearchStats::default());
    }

    #[test]
    fn test_utilization_percent() {
        let mut result = SolveResult::new(Placement::empty());
        result.utilization = 0.85;
        assert_eq!(result.utilization_percent(), "85.0%");
    }
}
