//! Truckload Benchmark Runner CLI

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use truckload_benchmark::{
    BenchmarkConfig, BenchmarkRunner, PackingReport, ProblemParser, SampleRoutes,
    SyntheticGenerator,
};
use truckload_core::{Config, Error, ErrorKind};
use truckload_packer::TruckPacker;

#[derive(Parser)]
#[command(name = "truckload-bench")]
#[command(about = "Benchmark runner for truckload")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    solver: SolverArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SolverArgs {
    /// Node budget per root branch
    #[arg(long, global = true, default_value = "100000")]
    max_nodes: u64,

    /// Candidate positions kept per box
    #[arg(long, global = true, default_value = "8")]
    max_candidates: usize,

    /// Levels above the deepest box that may be revised
    #[arg(long, global = true, default_value = "6")]
    backtrack_depth: usize,

    /// Worker threads for root branches (0 = all cores)
    #[arg(long, global = true, default_value = "1")]
    threads: usize,

    /// Wall-clock limit in milliseconds (0 = none)
    #[arg(long, global = true, default_value = "0")]
    time_limit: u64,
}

impl SolverArgs {
    fn config(&self) -> Config {
        Config::new()
            .with_max_nodes(self.max_nodes)
            .with_max_candidates(self.max_candidates)
            .with_max_backtrack_depth(self.backtrack_depth)
            .with_threads(self.threads)
            .with_time_limit(self.time_limit)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in sample routes
    List,

    /// Pack a problem file and print or save the placement
    Pack {
        /// Path to the JSON problem file
        file: PathBuf,

        /// Output file for the placement (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run benchmarks on all sample routes
    RunSamples {
        /// Number of runs per route
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for CSV results
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Run benchmark from a local JSON file
    RunFile {
        /// Path to the JSON problem file
        file: PathBuf,

        /// Number of runs
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a synthetic problem
    Generate {
        /// Number of boxes
        #[arg(short, long, default_value = "20")]
        boxes: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of delivery stops
        #[arg(long, default_value = "4")]
        stops: i64,

        /// Truck dimensions
        #[arg(long, num_args = 3, default_values_t = vec![13.6, 2.45, 2.7])]
        truck: Vec<f64>,

        /// Shrink factor applied to each cut piece
        #[arg(long, default_value = "0.9")]
        scale: f64,

        /// Draw independent random boxes instead of cutting the truck
        #[arg(long)]
        random: bool,

        /// Output file (JSON), stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Exit status for a failed `pack`: 2 for rejected input, 3 when no placement was found.
fn exit_code(error: &Error) -> i32 {
    match error.kind() {
        ErrorKind::Validation | ErrorKind::Config => 2,
        ErrorKind::Infeasible => 3,
        ErrorKind::Cancelled | ErrorKind::Internal => 1,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.solver.config();

    match cli.command {
        Commands::List => {
            let samples = SampleRoutes::builtin();
            println!("Available Sample Routes:");
            println!("========================");
            for (name, problem) in samples.iter() {
                let info = problem.info();
                println!(
                    "  - {:<14} {:>3} boxes, {:>2} stops, fill {:>5.1}%",
                    name,
                    info.boxes,
                    info.stops,
                    info.fill_ratio * 100.0
                );
            }
            println!("\nUse 'truckload-bench run-samples' to run them");
        }

        Commands::Pack { file, output } => {
            let parser = ProblemParser::new();
            let problem = parser
                .parse_file(&file)
                .with_context(|| format!("reading {}", file.display()))?;

            let packer = TruckPacker::new(config);
            let placement = match packer.pack(&problem.truck(), &problem.cargo()) {
                Ok(placement) => placement,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(exit_code(&e));
                }
            };
            let report = PackingReport::from_placement(&placement);

            match output {
                Some(path) => {
                    parser.write_report(&report, &path)?;
                    println!("Placement saved to: {}", path.display());
                }
                None => println!("{}", parser.report_json(&report)?),
            }
        }

        Commands::RunSamples { runs, output, csv } => {
            let samples = SampleRoutes::builtin();
            let bench = BenchmarkConfig::new()
                .with_solver_config(config)
                .with_runs_per_problem(runs);
            let results = BenchmarkRunner::new(bench).run_all(samples.iter());

            results.print_summary();

            println!("Status Summary:");
            println!("{:-<40}", "");
            for summary in results.summary_by_status() {
                println!(
                    "  {:<12} runs={:<3} avg_time={}ms",
                    summary.status, summary.run_count, summary.avg_time_ms
                );
            }

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("\nResults saved to: {}", path.display());
            }

            if let Some(path) = csv {
                results.save_csv(&path)?;
                println!("CSV saved to: {}", path.display());
            }
        }

        Commands::RunFile { file, runs, output } => {
            let problem = ProblemParser::new()
                .parse_file(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let name = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "problem".to_string());

            let bench = BenchmarkConfig::new()
                .with_solver_config(config)
                .with_runs_per_problem(runs);
            let results = BenchmarkRunner::new(bench).run_problem(&name, &problem);

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }
        }

        Commands::Generate {
            boxes,
            seed,
            stops,
            truck,
            scale,
            random,
            output,
        } => {
            let truck: [f64; 3] = truck
                .as_slice()
                .try_into()
                .context("truck needs exactly 3 dimensions")?;
            let mut generator = SyntheticGenerator::with_seed(seed);
            let problem = if random {
                generator.random(truck, boxes, stops)
            } else {
                generator.guillotine(truck, boxes, stops, scale)
            };
            let json = serde_json::to_string_pretty(&problem)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Problem saved to: {}", path.display());
                    println!("  Boxes: {}", problem.boxes.len());
                    println!("  Fill: {:.1}%", problem.info().fill_ratio * 100.0);
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
