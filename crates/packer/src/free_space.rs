//! Free-space model for truck loading.
//!
//! Tracks the empty part of the truck as a set of maximal empty spaces
//! (EMS): axis-aligned cuboids that contain no placed box and are not
//! contained in any other empty space. Every empty point of the truck lies
//! in at least one space, and spaces may overlap each other.
//!
//! # Algorithm Overview
//!
//! Placing a box replaces each space it cuts with up to six residual spaces,
//! one per face of the box. Residuals that are degenerate, too thin for any
//! remaining box, or contained in another space are dropped. Candidate
//! positions are the minimum corners of the spaces.
//!
//! # References
//!
//! - Lai, K. K., & Chan, J. W. M. (1997). Developing a simulated annealing
//!   algorithm for the cutting stock problem.
//! - Parreño, F., Alvarez-Valdes, R., Tamarit, J. M., & Oliveira, J. F. (2008).
//!   A maximal-space algorithm for the container loading problem.

use std::cmp::Ordering;
use truckload_core::geometry::{Dimensions, EPSILON};
use truckload_core::region::Region;

/// Deterministic order: lowest x, then y, then z.
fn space_order(a: &Region, b: &Region) -> Ordering {
    (0..3)
        .map(|axis| a.min[axis].total_cmp(&b.min[axis]))
        .chain((0..3).map(|axis| a.max[axis].total_cmp(&b.max[axis])))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn smallest_extent(region: &Region) -> f64 {
    (0..3)
        .map(|axis| region.max[axis] - region.min[axis])
        .fold(f64::INFINITY, f64::min)
}

/// Maximal empty space manager with undo.
#[derive(Debug, Clone)]
pub struct FreeSpaceModel {
    /// Maximal empty spaces, kept sorted by [`space_order`].
    spaces: Vec<Region>,
    /// Snapshots taken before each `occupy`.
    history: Vec<Vec<Region>>,
}

impl FreeSpaceModel {
    /// Creates a model for an empty container.
    pub fn new(container: &Dimensions) -> Self {
        Self {
            spaces: vec![Region::from_size(container)],
            history: Vec::new(),
        }
    }

    /// Returns the number of empty spaces.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Returns true if no empty space is left.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Returns the empty spaces in deterministic order.
    pub fn spaces(&self) -> &[Region] {
        &self.spaces
    }

    /// Iterates over spaces whose minimum corner can hold a box of `dims`.
    pub fn fitting<'a>(&'a self, dims: &'a Dimensions) -> impl Iterator<Item = &'a Region> + 'a {
        self.spaces.iter().filter(move |space| dims.fits_within(&space.size()))
    }

    /// Marks `region` as occupied.
    ///
    /// Residual spaces whose smallest extent is below `min_extent` are
    /// discarded; pass `0.0` to keep every non-degenerate space.
    pub fn occupy(&mut self, region: &Region, min_extent: f64) {
        self.history.push(self.spaces.clone());

        let mut untouched: Vec<Region> = Vec::with_capacity(self.spaces.len() + 6);
        let mut fresh: Vec<Region> = Vec::new();

        for space in self.spaces.drain(..) {
            if !space.intersects(region) {
                untouched.push(space);
                continue;
            }

            for axis in 0..3 {
                if region.min[axis] > space.min[axis] + EPSILON {
                    let mut below = space;
                    below.max[axis] = region.min[axis];
                    fresh.push(below);
                }
                if region.max[axis] < space.max[axis] - EPSILON {
                    let mut above = space;
                    above.min[axis] = region.max[axis];
                    fresh.push(above);
                }
            }
        }

        fresh.retain(|s| !s.is_degenerate() && smallest_extent(s) >= min_extent - EPSILON);

        // Untouched spaces stay maximal; only residuals can be dominated.
        let mut kept: Vec<Region> = Vec::with_capacity(fresh.len());
        for (i, space) in fresh.iter().enumerate() {
            let dominated = untouched.iter().any(|other| other.contains(space))
                || fresh.iter().enumerate().any(|(j, other)| {
                    j != i && other.contains(space) && (j < i || !space.contains(other))
                });
            if !dominated {
                kept.push(*space);
            }
        }

        untouched.extend(kept);
        untouched.sort_by(space_order);
        self.spaces = untouched;
    }

    /// Restores the state before the last `occupy`.
    ///
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.spaces = previous;
                true
            }
            None => false,
        }
    }
}
