//! # held-karp CLI
//!
//! Solves a TSP instance exactly and prints the tour with 1-indexed city
//! labels. Without `--matrix` or `--random` it solves a built-in seven-city
//! road network.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use held_karp::distance::{DistanceMatrix, NO_EDGE};
use held_karp::exact::{brute_force, BRUTE_FORCE_MAX_CITIES};
use held_karp::models::Tour;
use held_karp::{HeldKarpSolver, SolverConfig};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Command-line interface for held-karp
#[derive(Parser)]
#[command(name = "held-karp")]
#[command(version, about = "Exact TSP solver using Held-Karp dynamic programming")]
#[command(long_about = "Finds the minimum-cost Hamiltonian cycle through a start city:
  held-karp                          # Solve the built-in 7-city example
  held-karp --matrix roads.json      # Solve a matrix file
  held-karp --random 12 --seed 7     # Solve a random complete graph

Matrix files are JSON: {\"rows\": [[0, 12, null], [12, 0, 8], [null, 8, 0]]}
where null marks a missing edge.")]
struct Cli {
    /// JSON matrix file
    #[arg(long, conflicts_with = "random")]
    matrix: Option<PathBuf>,

    /// Generate a random complete graph with this many cities
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Largest edge cost for --random
    #[arg(long, default_value_t = 100)]
    max_cost: u32,

    /// Start city, 1-indexed
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// Reject instances with more cities than this
    #[arg(long)]
    max_cities: Option<usize>,

    /// Reject instances whose DP table exceeds this many MiB
    #[arg(long)]
    memory_budget_mb: Option<usize>,

    /// Cross-check the optimal cost by exhaustive search
    #[arg(long)]
    verify: bool,

    /// Print the tour as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = solver_config(cli);
    let matrix = load_matrix(cli, &config)?;
    if cli.start == 0 || cli.start > matrix.size() {
        bail!(
            "start city {} is not a label in 1..={}",
            cli.start,
            matrix.size()
        );
    }
    let origin = cli.start - 1;

    let solver = HeldKarpSolver::new(config);
    let tour = solver
        .solve(&matrix, origin)
        .with_context(|| format!("failed to solve {}-city instance", matrix.size()))?;
    info!("solved {} cities, cost {}", matrix.size(), tour.cost());

    if cli.verify {
        verify(&matrix, origin, &tour)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tour)?);
    } else {
        println!("Route: {:?}", tour.labels());
        println!("Path: {tour}");
        println!("Total distance: {}", tour.cost());
    }
    Ok(())
}

fn load_matrix(cli: &Cli, config: &SolverConfig) -> anyhow::Result<DistanceMatrix> {
    if let Some(path) = &cli.matrix {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return DistanceMatrix::from_json_str(&json)
            .with_context(|| format!("invalid matrix in {}", path.display()));
    }
    if let Some(n) = cli.random {
        // Checked before the n*n matrix is allocated.
        config
            .check_capacity(n)
            .with_context(|| format!("refusing to generate {n} random cities"))?;
        let mut rng = StdRng::seed_from_u64(cli.seed);
        return Ok(DistanceMatrix::random(n, cli.max_cost, &mut rng));
    }
    Ok(seven_city_example()?)
}

fn solver_config(cli: &Cli) -> SolverConfig {
    let mut config = SolverConfig::default();
    if let Some(max_cities) = cli.max_cities {
        config = config.with_max_cities(max_cities);
    }
    if let Some(mb) = cli.memory_budget_mb {
        config = config.with_memory_budget(mb.saturating_mul(1 << 20));
    }
    config
}

fn verify(matrix: &DistanceMatrix, origin: usize, tour: &Tour) -> anyhow::Result<()> {
    if matrix.size() > BRUTE_FORCE_MAX_CITIES {
        bail!("--verify supports at most {BRUTE_FORCE_MAX_CITIES} cities");
    }
    let oracle = brute_force(matrix, origin).context("exhaustive search failed")?;
    if oracle.cost() != tour.cost() {
        bail!(
            "cost mismatch: dynamic program {} vs exhaustive {}",
            tour.cost(),
            oracle.cost()
        );
    }
    info!("verified against exhaustive search");
    Ok(())
}

/// Seven-city road network; `NO_EDGE` marks cities without a direct road.
fn seven_city_example() -> held_karp::Result<DistanceMatrix> {
    let x = NO_EDGE;
    DistanceMatrix::from_rows(vec![
        vec![0.0, 12.0, 10.0, x, x, x, 12.0],
        vec![12.0, 0.0, 8.0, 12.0, x, x, x],
        vec![10.0, 8.0, 0.0, 11.0, 3.0, x, 9.0],
        vec![x, 12.0, 11.0, 0.0, 11.0, 10.0, x],
        vec![x, x, 3.0, 11.0, 0.0, 6.0, 7.0],
        vec![x, x, x, 10.0, 6.0, 0.0, 9.0],
        vec![12.0, x, 9.0, x, 7.0, 9.0, 0.0],
    ])
}
