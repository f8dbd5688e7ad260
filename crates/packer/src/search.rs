//! Depth-first placement search with bounded backtracking.
//!
//! Boxes are committed in load order (highest route order first). Each box
//! tries its candidate positions, lowest depth first, and the search backs
//! up when a box has nowhere to go. Work is bounded per root branch by a
//! node budget and by a backtracking window measured from the deepest box
//! reached, so the search is a heuristic: failing does not prove that no
//! placement exists.
//!
//! All coordinates here are in the load frame, where `x` is the distance
//! from the back wall. Callers convert to the truck frame.

use crate::free_space::FreeSpaceModel;
use crate::geometry::CargoBox;
use crate::lane::{Footprint, LaneIndex};
use nalgebra::{Vector2, Vector3};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::time::Instant;
use truckload_core::geometry::{Dimensions, Orientation, EPSILON};
use truckload_core::region::Region;
use truckload_core::solver::{Config, ProgressInfo};
use truckload_core::{Error, Infeasibility, Result, SearchStats};

/// A position a box could take, in the load frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Minimum corner.
    pub position: Vector3<f64>,
    /// Orientation used.
    pub orientation: Orientation,
    /// Effective dimensions for the orientation.
    pub size: Dimensions,
}

impl Candidate {
    /// Returns the region the box would occupy.
    pub fn region(&self) -> Region {
        Region::from_origin_and_size(self.position, &self.size)
    }

    fn same_as(&self, other: &Candidate) -> bool {
        self.orientation == other.orientation
            && (self.position - other.position).amax() <= EPSILON
    }
}

/// Lowest x, then y, then z, then orientation index.
fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    a.position
        .x
        .total_cmp(&b.position.x)
        .then(a.position.y.total_cmp(&b.position.y))
        .then(a.position.z.total_cmp(&b.position.z))
        .then(a.orientation.cmp(&b.orientation))
}

/// A box committed by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    /// Index of the box in the input slice.
    pub item: usize,
    /// Where it was put.
    pub candidate: Candidate,
}

/// A complete load found by the search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Committed boxes in load order.
    pub committed: Vec<Committed>,
    /// Counters over all explored branches.
    pub stats: SearchStats,
}

/// Why a root branch stopped.
#[derive(Debug)]
enum BranchEnd {
    Solved(Vec<Committed>, usize),
    Budget,
    Exhausted,
    TimeLimit,
    Cancelled,
    Superseded,
}

#[derive(Debug)]
struct BranchReport {
    end: BranchEnd,
    nodes: u64,
    backtracks: u64,
    deepest: usize,
}

/// One level of the depth-first search.
struct Frame {
    candidates: Vec<Candidate>,
    next: usize,
    committed: bool,
}

impl Frame {
    fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            next: 0,
            committed: false,
        }
    }
}

/// Progress callback as seen by the search.
pub type ProgressFn<'a> = &'a (dyn Fn(ProgressInfo) + Send + Sync);

/// Search over one loading problem.
pub struct PlacementSearch<'a> {
    truck: Dimensions,
    items: &'a [CargoBox],
    config: &'a Config,
    cancelled: &'a AtomicBool,
    progress: Option<ProgressFn<'a>>,
    started: Instant,
    /// Input indices in load order.
    order: Vec<usize>,
    /// Smallest box extent among boxes after each load position.
    min_extent_after: Vec<f64>,
}

impl<'a> PlacementSearch<'a> {
    /// Prepares a search over validated input.
    pub fn new(
        truck: Dimensions,
        items: &'a [CargoBox],
        config: &'a Config,
        cancelled: &'a AtomicBool,
    ) -> Self {
        let order = load_order(items);

        let mut min_extent_after = vec![f64::INFINITY; order.len()];
        for pos in (0..order.len().saturating_sub(1)).rev() {
            let next = items[order[pos + 1]].dimensions().sorted()[0];
            min_extent_after[pos] = min_extent_after[pos + 1].min(next);
        }

        Self {
            truck,
            items,
            config,
            cancelled,
            progress: None,
            started: Instant::now(),
            order,
            min_extent_after,
        }
    }

    /// Reports progress to `callback` whenever a branch reaches a new depth.
    pub fn with_progress(mut self, callback: ProgressFn<'a>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Runs the search.
    pub fn run(&self) -> Result<SearchOutcome> {
        if self.order.is_empty() {
            return Ok(SearchOutcome {
                committed: Vec::new(),
                stats: SearchStats::default(),
            });
        }

        let roots = self.candidates(
            &FreeSpaceModel::new(&self.truck),
            &LaneIndex::new(),
            self.order[0],
        );
        log::debug!(
            "searching {} boxes from {} root branches",
            self.order.len(),
            roots.len()
        );

        let superseded = AtomicUsize::new(usize::MAX);
        let reports: Vec<BranchReport> = if self.config.threads == 1 || roots.len() < 2 {
            let mut reports = Vec::with_capacity(roots.len());
            for (idx, root) in roots.iter().enumerate() {
                let report = self.explore(idx, root, &superseded);
                let stop = !matches!(report.end, BranchEnd::Budget | BranchEnd::Exhausted);
                reports.push(report);
                if stop {
                    break;
                }
            }
            reports
        } else {
            self.explore_parallel(&roots, &superseded)
        };

        self.conclude(reports)
    }

    fn explore_parallel(&self, roots: &[Candidate], superseded: &AtomicUsize) -> Vec<BranchReport> {
        let run = || -> Vec<BranchReport> {
            roots
                .par_iter()
                .enumerate()
                .map(|(idx, root)| self.explore(idx, root, superseded))
                .collect()
        };

        if self.config.threads == 0 {
            return run();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
        {
            Ok(pool) => pool.install(run),
            Err(e) => {
                log::warn!("thread pool unavailable ({}), exploring branches in order", e);
                roots
                    .iter()
                    .enumerate()
                    .map(|(idx, root)| self.explore(idx, root, superseded))
                    .collect()
            }
        }
    }

    /// Picks the outcome from branch reports, scanning in root order.
    fn conclude(&self, reports: Vec<BranchReport>) -> Result<SearchOutcome> {
        let mut stats = SearchStats {
            branches: reports.len(),
            ..SearchStats::default()
        };
        let mut budget_hit = false;
        let mut deepest = 0;

        for report in &reports {
            stats.nodes_expanded += report.nodes;
            stats.backtracks += report.backtracks;
        }

        for report in reports {
            deepest = deepest.max(report.deepest);
            match report.end {
                BranchEnd::Solved(committed, lanes) => {
                    stats.lanes = lanes;
                    log::debug!(
                        "placement found after {} nodes, {} backtracks",
                        stats.nodes_expanded,
                        stats.backtracks
                    );
                    return Ok(SearchOutcome { committed, stats });
                }
                BranchEnd::Cancelled => return Err(Error::Cancelled),
                BranchEnd::TimeLimit => {
                    return Err(Error::Infeasible(Infeasibility::TimeLimit {
                        ms: self.config.time_limit_ms,
                    }))
                }
                BranchEnd::Budget => budget_hit = true,
                BranchEnd::Exhausted | BranchEnd::Superseded => {}
            }
        }

        log::debug!(
            "no placement: {} nodes over {} branches, deepest {}/{}",
            stats.nodes_expanded,
            stats.branches,
            deepest,
            self.order.len()
        );

        if budget_hit {
            Err(Error::Infeasible(Infeasibility::BudgetExhausted {
                nodes: stats.nodes_expanded,
            }))
        } else {
            Err(Error::Infeasible(Infeasibility::SearchExhausted {
                placed: deepest,
                total: self.order.len(),
            }))
        }
    }

    fn interrupted(&self, branch: usize, superseded: &AtomicUsize) -> Option<BranchEnd> {
        if self.cancelled.load(AtomicOrdering::Relaxed) {
            return Some(BranchEnd::Cancelled);
        }
        if superseded.load(AtomicOrdering::Relaxed) < branch {
            return Some(BranchEnd::Superseded);
        }
        if self.config.time_limit_ms > 0
            && self.started.elapsed().as_millis() as u64 >= self.config.time_limit_ms
        {
            return Some(BranchEnd::TimeLimit);
        }
        None
    }

    /// Explores the subtree below one root candidate.
    fn explore(&self, branch: usize, root: &Candidate, superseded: &AtomicUsize) -> BranchReport {
        let total = self.order.len();
        let mut model = FreeSpaceModel::new(&self.truck);
        let mut lanes = LaneIndex::new();
        let mut committed: Vec<Committed> = Vec::with_capacity(total);
        let mut frames = vec![Frame::new(vec![root.clone()])];
        let mut nodes = 0u64;
        let mut backtracks = 0u64;
        let mut deepest = 0usize;

        let report = |end, nodes, backtracks, deepest| BranchReport {
            end,
            nodes,
            backtracks,
            deepest,
        };

        while let Some(depth) = frames.len().checked_sub(1) {
            // Interrupts are honoured between nodes, when model and lanes agree.
            if let Some(end) = self.interrupted(branch, superseded) {
                return report(end, nodes, backtracks, deepest);
            }

            let frame = &mut frames[depth];
            if frame.committed {
                model.undo();
                lanes.undo();
                committed.pop();
                frame.committed = false;
                backtracks += 1;
            }

            if frame.next > 0 && deepest - depth > self.config.max_backtrack_depth {
                frames.pop();
                continue;
            }
            let Some(candidate) = frame.candidates.get(frame.next).cloned() else {
                frames.pop();
                continue;
            };
            frame.next += 1;

            if nodes >= self.config.max_nodes {
                log::debug!("branch {} exhausted its budget of {} nodes", branch, nodes);
                return report(BranchEnd::Budget, nodes, backtracks, deepest);
            }
            nodes += 1;

            let item = self.order[depth];
            let region = candidate.region();
            model.occupy(&region, self.min_extent_after[depth]);
            lanes.insert(&region, item, self.items[item].route_order());
            committed.push(Committed { item, candidate });
            frames[depth].committed = true;

            if committed.len() == total {
                superseded.fetch_min(branch, AtomicOrdering::Relaxed);
                let lane_count = lanes.len();
                return report(
                    BranchEnd::Solved(committed, lane_count),
                    nodes,
                    backtracks,
                    total,
                );
            }

            let next = self.candidates(&model, &lanes, self.order[depth + 1]);
            frames.push(Frame::new(next));

            if depth + 1 > deepest {
                deepest = depth + 1;
                if let Some(callback) = self.progress {
                    callback(ProgressInfo {
                        nodes_expanded: nodes,
                        placed: deepest,
                        total,
                        elapsed_ms: self.started.elapsed().as_millis() as u64,
                        running: true,
                    });
                }
            }
        }

        log::debug!(
            "branch {} exhausted after {} nodes, deepest {}/{}",
            branch,
            nodes,
            deepest,
            total
        );
        report(BranchEnd::Exhausted, nodes, backtracks, deepest)
    }

    /// Candidate positions for one box, best first.
    pub fn candidates(
        &self,
        model: &FreeSpaceModel,
        lanes: &LaneIndex,
        item: usize,
    ) -> Vec<Candidate> {
        let cargo = &self.items[item];
        let mut candidates = Vec::new();

        for (orientation, size) in cargo.distinct_orientations() {
            for space in model.fitting(&size) {
                let footprint = Footprint {
                    min: Vector2::new(space.min.y, space.min.z),
                    max: Vector2::new(space.min.y + size.width(), space.min.z + size.height()),
                };
                let depth = space
                    .min
                    .x
                    .max(lanes.required_depth(&footprint, cargo.route_order()));
                if depth + size.length() > space.max.x + EPSILON {
                    continue;
                }
                candidates.push(Candidate {
                    position: Vector3::new(depth, space.min.y, space.min.z),
                    orientation,
                    size,
                });
            }
        }

        candidates.sort_by(candidate_order);
        candidates.dedup_by(|a, b| a.same_as(b));
        candidates.truncate(self.config.max_candidates);
        candidates
    }
}

/// Input indices sorted by route order descending, then input order.
pub fn load_order(items: &[CargoBox]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[b]
            .route_order()
            .cmp(&items[a].route_order())
            .then(a.cmp(&b))
    });
    order
}
