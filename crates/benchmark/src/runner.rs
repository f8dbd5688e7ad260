//! Benchmark runner.

use crate::dataset::Problem;
use crate::result::{BenchmarkResult, RunResult, RunStatus};
use std::time::Instant;
use truckload_core::{Config, ErrorKind, Solver};
use truckload_packer::TruckPacker;

/// Benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Solver configuration used for every run
    pub solver: Config,
    /// Number of runs per problem
    pub runs_per_problem: usize,
    /// Whether to print per-run lines
    pub show_progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            solver: Config::default(),
            runs_per_problem: 1,
            show_progress: true,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new benchmark config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solver configuration.
    pub fn with_solver_config(mut self, config: Config) -> Self {
        self.solver = config;
        self
    }

    /// Sets the number of runs per problem.
    pub fn with_runs_per_problem(mut self, n: usize) -> Self {
        self.runs_per_problem = n.max(1);
        self
    }

    /// Disables per-run output.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }
}

/// Runs the packer over problems and records outcomes.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a new benchmark runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Runs one problem `runs_per_problem` times.
    pub fn run_problem(&self, name: &str, problem: &Problem) -> BenchmarkResult {
        let mut results = BenchmarkResult::new();
        let truck = problem.truck();
        let boxes = problem.cargo();

        if self.config.show_progress {
            let info = problem.info();
            println!(
                "\nBenchmarking {}: {} boxes, {} stops, fill {:.1}%",
                name,
                info.boxes,
                info.stops,
                info.fill_ratio * 100.0
            );
        }

        log::info!("running {} ({} boxes)", name, boxes.len());

        for run_idx in 0..self.config.runs_per_problem {
            let packer = TruckPacker::new(self.config.solver.clone());

            let start = Instant::now();
            let outcome = packer.solve(&boxes, &truck);
            let elapsed = start.elapsed().as_millis() as u64;

            let run = match outcome {
                Ok(solved) => {
                    let stats = solved.placement_stats();
                    RunResult {
                        problem: name.to_string(),
                        run: run_idx + 1,
                        status: RunStatus::Packed,
                        boxes: boxes.len(),
                        utilization: solved.utilization,
                        nodes: solved.stats.nodes_expanded,
                        rotated: stats.rotated_count,
                        loaded_length: stats.loaded_length,
                        time_ms: elapsed,
                        detail: None,
                    }
                }
                Err(e) => {
                    let status = match e.kind() {
                        ErrorKind::Validation | ErrorKind::Config => RunStatus::Invalid,
                        ErrorKind::Infeasible => RunStatus::Infeasible,
                        ErrorKind::Cancelled | ErrorKind::Internal => RunStatus::Error,
                    };
                    if status == RunStatus::Error {
                        log::warn!("{} run {} failed: {}", name, run_idx + 1, e);
                    }
                    RunResult {
                        problem: name.to_string(),
                        run: run_idx + 1,
                        status,
                        boxes: boxes.len(),
                        utilization: 0.0,
                        nodes: 0,
                        rotated: 0,
                        loaded_length: 0.0,
                        time_ms: elapsed,
                        detail: Some(e.to_string()),
                    }
                }
            };

            if self.config.show_progress {
                println!(
                    "  Run {}: {} util={:.1}% nodes={} time={}ms",
                    run.run,
                    run.status,
                    run.utilization * 100.0,
                    run.nodes,
                    run.time_ms
                );
            }

            results.add_run(run);
        }

        log::info!("finished {}", name);
        results
    }

    /// Runs every named problem.
    pub fn run_all<'a>(
        &self,
        problems: impl IntoIterator<Item = (&'a str, &'a Problem)>,
    ) -> BenchmarkResult {
        let mut combined = BenchmarkResult::new();
        for (name, problem) in problems {
            combined.merge(self.run_problem(name, problem));
        }
        combined
    }
}
