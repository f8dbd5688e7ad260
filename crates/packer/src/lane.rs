//! Footprint lanes for the unloading order constraint.
//!
//! A lane is a column of boxes sharing one (width × height) footprint,
//! stacked along the door axis. Boxes whose footprints do not overlap never
//! block each other, so the delivery order only has to be monotonic among
//! lanes whose footprints overlap.
//!
//! Depths here are measured in the load frame: distance from the back wall,
//! so depth 0 is the deepest position in the truck. A box with a higher
//! route order must sit deeper than every lower-order box it overlaps in
//! footprint.

use nalgebra::Vector2;
use truckload_core::geometry::EPSILON;
use truckload_core::region::{spans_overlap, Region};

/// Projection of a region onto the (y, z) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Minimum (y, z) corner.
    pub min: Vector2<f64>,
    /// Maximum (y, z) corner.
    pub max: Vector2<f64>,
}

impl Footprint {
    /// Projects a region.
    pub fn of(region: &Region) -> Self {
        Self {
            min: Vector2::new(region.min.y, region.min.z),
            max: Vector2::new(region.max.y, region.max.z),
        }
    }

    /// Returns true if the two footprints share positive area.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        (0..2).all(|axis| {
            spans_overlap(self.min[axis], self.max[axis], other.min[axis], other.max[axis])
        })
    }

    /// Returns true if both footprints coincide within [`EPSILON`].
    pub fn approx_eq(&self, other: &Footprint) -> bool {
        (self.min - other.min).amax() <= EPSILON && (self.max - other.max).amax() <= EPSILON
    }
}

/// A box committed to a lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneEntry {
    /// Index of the box in the caller's item list.
    pub item: usize,
    /// Depth of the face nearest the back wall.
    pub depth_start: f64,
    /// Depth of the face nearest the door.
    pub depth_end: f64,
    /// Route order of the box.
    pub route_order: i64,
}

/// Boxes sharing one footprint.
#[derive(Debug, Clone)]
pub struct Lane {
    footprint: Footprint,
    entries: Vec<LaneEntry>,
}

impl Lane {
    /// Returns the number of boxes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the lane holds no box.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First pair of neighbours, deeper box first, whose route order
    /// increases towards the door.
    pub fn inversion(&self) -> Option<(&LaneEntry, &LaneEntry)> {
        let mut by_depth: Vec<&LaneEntry> = self.entries.iter().collect();
        by_depth.sort_by(|a, b| a.depth_start.total_cmp(&b.depth_start));
        by_depth
            .windows(2)
            .find(|w| w[0].route_order < w[1].route_order)
            .map(|w| (w[0], w[1]))
    }
}

/// All lanes of a partial load, with undo.
#[derive(Debug, Clone, Default)]
pub struct LaneIndex {
    lanes: Vec<Lane>,
    /// Lane index of every committed entry, in commit order.
    journal: Vec<usize>,
}

impl LaneIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of lanes.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns true if no lane is open.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Returns the lanes in the order they were opened.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Minimum depth at which a box with `footprint` and `route_order` may start.
    ///
    /// This is the door-most face of any committed box with a strictly
    /// higher route order whose footprint overlaps.
    pub fn required_depth(&self, footprint: &Footprint, route_order: i64) -> f64 {
        self.lanes
            .iter()
            .filter(|lane| lane.footprint.overlaps(footprint))
            .flat_map(|lane| lane.entries.iter())
            .filter(|e| e.route_order > route_order)
            .map(|e| e.depth_end)
            .fold(0.0, f64::max)
    }

    /// Commits a box occupying `region` (load frame) and returns its lane index.
    pub fn insert(&mut self, region: &Region, item: usize, route_order: i64) -> usize {
        let footprint = Footprint::of(region);
        let entry = LaneEntry {
            item,
            depth_start: region.min.x,
            depth_end: region.max.x,
            route_order,
        };

        let lane_idx = match self
            .lanes
            .iter()
            .position(|lane| lane.footprint.approx_eq(&footprint))
        {
            Some(idx) => idx,
            None => {
                self.lanes.push(Lane {
                    footprint,
                    entries: Vec::new(),
                });
                self.lanes.len() - 1
            }
        };

        self.lanes[lane_idx].entries.push(entry);
        self.journal.push(lane_idx);
        lane_idx
    }

    /// Removes the most recently committed box.
    pub fn undo(&mut self) -> Option<LaneEntry> {
        let lane_idx = self.journal.pop()?;
        let entry = self.lanes[lane_idx].entries.pop();
        // Lanes are opened in commit order, so an emptied lane is the last one.
        if self.lanes[lane_idx].is_empty() && lane_idx + 1 == self.lanes.len() {
            self.lanes.pop();
        }
        entry
    }
}
