//! Benchmark Suite for truckload
//!
//! This crate provides:
//! - JSON problem and placement formats
//! - A catalog of sample routes
//! - Synthetic instance generation
//! - Benchmark runner with result recording

mod dataset;
mod parser;
mod result;
mod runner;
mod samples;
mod synthetic;

pub use dataset::{BoxSpec, PackingReport, PlacedBoxSpec, Problem, ProblemInfo};
pub use parser::{ParseError, ProblemParser};
pub use result::{BenchmarkResult, RunResult, RunStatus, StatusSummary};
pub use runner::{BenchmarkConfig, BenchmarkRunner};
pub use samples::SampleRoutes;
pub use synthetic::SyntheticGenerator;
