//! Synthetic instance generator.
//!
//! Cuts the truck into boxes with random guillotine cuts, so every generated
//! instance fits the truck by volume and geometrically when route orders
//! are ignored.

use crate::dataset::{BoxSpec, Problem};
use rand::prelude::*;

/// Generator for synthetic loading problems.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator {
    /// Creates a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `count` boxes by guillotine-cutting `truck`.
    ///
    /// Each piece is shrunk by `scale` (clamped to `(0, 1]`) on every axis,
    /// randomly rotated, and given a route order in `0..stops`.
    pub fn guillotine(&mut self, truck: [f64; 3], count: usize, stops: i64, scale: f64) -> Problem {
        let scale = if scale > 0.0 { scale.min(1.0) } else { 1.0 };
        let stops = stops.max(1);

        let mut pieces: Vec<[f64; 3]> = vec![truck];
        while pieces.len() < count {
            // Always split the largest piece along its longest side.
            let Some((idx, _)) = pieces
                .iter()
                .enumerate()
                .max_by(|a, b| volume(a.1).total_cmp(&volume(b.1)))
            else {
                break;
            };
            let piece = pieces.swap_remove(idx);
            let axis = (0..3)
                .max_by(|&a, &b| piece[a].total_cmp(&piece[b]))
                .unwrap_or(0);
            let cut = piece[axis] * self.rng.gen_range(0.3..0.7);

            let mut first = piece;
            let mut second = piece;
            first[axis] = cut;
            second[axis] = piece[axis] - cut;
            pieces.push(first);
            pieces.push(second);
        }
        pieces.truncate(count);
        pieces.shuffle(&mut self.rng);

        let boxes = pieces
            .into_iter()
            .enumerate()
            .map(|(i, mut size)| {
                size.shuffle(&mut self.rng);
                for extent in &mut size {
                    *extent = round3(*extent * scale);
                }
                BoxSpec::new(format!("box-{}", i), size, self.rng.gen_range(0..stops))
            })
            .collect();

        Problem::new(truck, boxes)
    }

    /// Generates independent random boxes, with no guarantee of fit.
    pub fn random(&mut self, truck: [f64; 3], count: usize, stops: i64) -> Problem {
        let stops = stops.max(1);
        let boxes = (0..count)
            .map(|i| {
                let size = [
                    round3(truck[0] * self.rng.gen_range(0.05..0.3)),
                    round3(truck[1] * self.rng.gen_range(0.1..0.5)),
                    round3(truck[2] * self.rng.gen_range(0.1..0.5)),
                ];
                BoxSpec::new(format!("box-{}", i), size, self.rng.gen_range(0..stops))
            })
            .collect();
        Problem::new(truck, boxes)
    }
}

fn volume(size: &[f64; 3]) -> f64 {
    size.iter().product()
}

/// Rounds down to millimetres, so the scaled box never grows.
fn round3(value: f64) -> f64 {
    ((value * 1000.0).floor() / 1000.0).max(0.001)
}
