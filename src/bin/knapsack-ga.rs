//! Command-line front end: load a catalog, run the GA, print the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use knapsack_ga::ga::{FeasibilityPolicy, Generation, GenerationDriver, KnapsackConfig, Retention};
use knapsack_ga::Catalog;
use tracing::Level;

#[derive(Parser)]
#[command(name = "knapsack-ga")]
#[command(author, version, about = "Solve a 0/1 knapsack with a generational genetic algorithm", long_about = None)]
struct Cli {
    /// Headerless CSV of `index,weight,value` records
    catalog: PathBuf,

    /// TOML run configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Knapsack capacity
    #[arg(long)]
    capacity: Option<u64>,

    /// Candidates per generation (even, >= 2)
    #[arg(short = 'n', long)]
    population_size: Option<usize>,

    /// Generations to run after the seeded one
    #[arg(short, long)]
    generations: Option<usize>,

    /// Feasibility policy: repair (r) or penalty (p)
    #[arg(short, long)]
    policy: Option<FeasibilityPolicy>,

    /// Probability of mutating a child
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Fraction of the population drawn as parents
    #[arg(long)]
    reproduction_rate: Option<f64>,

    /// Weight slack tolerated when seeding under repair
    #[arg(long)]
    slack: Option<f64>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep every generation in memory instead of only the latest
    #[arg(long)]
    retain_all: bool,

    /// Print every generation and its candidates
    #[arg(long)]
    show_generations: bool,

    /// Emit the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

impl Cli {
    fn build_config(&self) -> Result<KnapsackConfig> {
        let mut config = match &self.config {
            Some(path) => KnapsackConfig::load(path)?,
            None => KnapsackConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        if let Some(n) = self.population_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.generations {
            config = config.with_max_generations(n);
        }
        if let Some(policy) = self.policy {
            config = config.with_policy(policy);
        }
        if let Some(rate) = self.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(rate) = self.reproduction_rate {
            config = config.with_reproduction_rate(rate);
        }
        if let Some(slack) = self.slack {
            config = config.with_initial_slack(slack);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.retain_all {
            config = config.with_retention(Retention::All);
        }
        Ok(config)
    }
}

fn print_generation(generation: &Generation) {
    println!("{generation}");
    for candidate in generation.population() {
        println!("{candidate}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::from_path(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let config = cli.build_config()?;

    let mut driver = GenerationDriver::new(&catalog, config)?;
    let summary = if cli.show_generations {
        driver.run_with_observer(print_generation)?
    } else {
        driver.run()?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Best after {} generations: {}",
            summary.generations, summary.best
        );
    }
    Ok(())
}
