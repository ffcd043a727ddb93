//! Schwefel Smoke Test
//!
//! Runs the archipelago on the Schwefel function and prints each island's
//! champion. The global minimum is close to zero.

use clap::Parser;
use pm_solver::core::config::OptimizerConfig;
use pm_solver::optimizer::{Archipelago, Schwefel};

#[derive(Parser, Debug)]
#[command(name = "schwefel_smoke")]
#[command(about = "Evolve islands on the Schwefel benchmark")]
struct Args {
    /// Problem dimension
    #[arg(long, default_value_t = 30)]
    dimension: usize,

    #[arg(long, default_value_t = 16)]
    islands: usize,

    #[arg(long, default_value_t = 20)]
    population: usize,

    #[arg(long, default_value_t = 100)]
    generations: u32,

    #[arg(long, default_value_t = 10)]
    evolutions: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = OptimizerConfig {
        islands: args.islands,
        population_size: args.population,
        generations: args.generations,
        evolutions: args.evolutions,
        seed: args.seed,
        ..OptimizerConfig::default()
    };

    match Archipelago::new(&config).evolve(&Schwefel::new(args.dimension)) {
        Ok(champions) => {
            for champion in &champions {
                println!("{}", champion.fitness);
            }
        }
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    }
}
