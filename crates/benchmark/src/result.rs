//! Benchmark result types and recording.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Outcome class of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every box was placed.
    Packed,
    /// The input was rejected before searching.
    Invalid,
    /// No placement was found.
    Infeasible,
    /// Cancelled or internal failure.
    Error,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Packed => "packed",
            RunStatus::Invalid => "invalid",
            RunStatus::Infeasible => "infeasible",
            RunStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Result of a single benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Problem name
    pub problem: String,
    /// Run number, starting at 1
    pub run: usize,
    pub status: RunStatus,
    /// Number of boxes in the problem
    pub boxes: usize,
    /// Utilization ratio (0.0 - 1.0), zero unless packed
    pub utilization: f64,
    /// Nodes expanded by the search
    pub nodes: u64,
    /// Boxes loaded in a rotated orientation
    pub rotated: usize,
    /// Door-axis length taken up by the load
    pub loaded_length: f64,
    /// Computation time in milliseconds
    pub time_ms: u64,
    /// Error message for unsuccessful runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Collection of benchmark results.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Individual run results
    pub runs: Vec<RunResult>,
    /// Version of the packer that produced the results
    pub version: String,
}

/// Run counts per status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub status: RunStatus,
    pub run_count: usize,
    pub avg_time_ms: u64,
}

impl BenchmarkResult {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Adds a run result.
    pub fn add_run(&mut self, result: RunResult) {
        self.runs.push(result);
    }

    /// Moves all runs of `other` into this set.
    pub fn merge(&mut self, other: BenchmarkResult) {
        self.runs.extend(other.runs);
    }

    /// Saves results to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Saves results to a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "problem,run,status,boxes,utilization,nodes,rotated,loaded_length,time_ms,detail")?;

        for run in &self.runs {
            writeln!(
                file,
                "{},{},{},{},{:.4},{},{},{:.3},{},{}",
                run.problem,
                run.run,
                run.status,
                run.boxes,
                run.utilization,
                run.nodes,
                run.rotated,
                run.loaded_length,
                run.time_ms,
                run.detail
                    .as_deref()
                    .map_or(String::new(), |d| format!("\"{}\"", d.replace('"', "'"))),
            )?;
        }

        Ok(())
    }

    /// Prints a summary table to stdout.
    pub fn print_summary(&self) {
        println!("\n{:=<90}", "");
        println!("BENCHMARK RESULTS");
        println!("{:=<90}", "");
        println!(
            "{:<20} {:>4} {:<11} {:>6} {:>8} {:>10} {:>8} {:>10}",
            "Problem", "Run", "Status", "Boxes", "Util%", "Nodes", "Rotated", "Time(ms)"
        );
        println!("{:-<90}", "");

        for run in &self.runs {
            println!(
                "{:<20} {:>4} {:<11} {:>6} {:>8.1} {:>10} {:>8} {:>10}",
                run.problem,
                run.run,
                run.status,
                run.boxes,
                run.utilization * 100.0,
                run.nodes,
                run.rotated,
                run.time_ms
            );
        }

        println!("{:=<90}\n", "");
    }

    /// Computes run counts grouped by status, in status order.
    pub fn summary_by_status(&self) -> Vec<StatusSummary> {
        use std::collections::BTreeMap;

        let mut by_status: BTreeMap<RunStatus, Vec<&RunResult>> = BTreeMap::new();
        for run in &self.runs {
            by_status.entry(run.status).or_default().push(run);
        }

        by_status
            .into_iter()
            .map(|(status, runs)| StatusSummary {
                status,
                run_count: runs.len(),
                avg_time_ms: runs.iter().map(|r| r.time_ms).sum::<u64>() / runs.len() as u64,
            })
            .collect()
    }
}
