//! Problem file parser.

use crate::dataset::{BoxSpec, PackingReport, Problem};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use truckload_packer::OrientationConstraint;

/// Errors that can occur when reading or writing problem files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid problem format: {0}")]
    InvalidFormat(String),
}

/// Reads problems and writes placements as JSON.
#[derive(Debug, Default)]
pub struct ProblemParser;

impl ProblemParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a problem from a JSON file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Problem, ParseError> {
        let content = fs::read_to_string(path)?;
        self.parse_json(&content)
    }

    /// Parses a problem from a JSON string.
    pub fn parse_json(&self, json: &str) -> Result<Problem, ParseError> {
        let raw: RawProblem = serde_json::from_str(json)?;
        self.convert_raw_problem(raw)
    }

    /// Serializes a placement report.
    pub fn report_json(&self, report: &PackingReport) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Writes a placement report to a file.
    pub fn write_report(&self, report: &PackingReport, path: impl AsRef<Path>) -> Result<(), ParseError> {
        fs::write(path, self.report_json(report)?)?;
        Ok(())
    }

    fn convert_raw_problem(&self, raw: RawProblem) -> Result<Problem, ParseError> {
        let truck = triple(&raw.truck).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "truck needs 3 dimensions, got {}",
                raw.truck.len()
            ))
        })?;

        let boxes: Result<Vec<BoxSpec>, ParseError> = raw
            .boxes
            .into_iter()
            .map(|b| {
                let size = triple(&b.size).ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "box '{}' needs 3 dimensions, got {}",
                        b.box_id,
                        b.size.len()
                    ))
                })?;
                Ok(BoxSpec {
                    box_id: b.box_id,
                    size,
                    route_order: b.route_order,
                    orientation: b.orientation,
                })
            })
            .collect();

        Ok(Problem {
            truck,
            boxes: boxes?,
        })
    }
}

fn triple(values: &[f64]) -> Option<[f64; 3]> {
    values.try_into().ok()
}

/// Raw problem as parsed from JSON.
#[derive(Debug, Deserialize)]
struct RawProblem {
    truck: Vec<f64>,
    #[serde(default)]
    boxes: Vec<RawBox>,
}

/// Raw box as parsed from JSON.
#[derive(Debug, Deserialize)]
struct RawBox {
    box_id: String,
    size: Vec<f64>,
    route_order: i64,
    #[serde(default)]
    orientation: OrientationConstraint,
}
