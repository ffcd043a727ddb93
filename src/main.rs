//! PM Solver - Entry Point
//!
//! Loads a configuration, applies command-line overrides, runs the island
//! search and prints the winning upbringing.

use std::path::PathBuf;

use clap::Parser;
use pm_solver::core::config::SolverConfig;
use pm_solver::core::error::Result;
use pm_solver::optimizer::DeVariant;
use pm_solver::scenario::ScenarioKind;
use pm_solver::Solution;

/// Search inclinations that raise the best character
#[derive(Parser, Debug)]
#[command(name = "pm_solver")]
#[command(about = "Evolve inclination vectors against a fuzzy rule base")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Character model to simulate
    #[arg(long, value_enum)]
    scenario: Option<ScenarioKind>,

    /// Rule base TOML to load instead of the embedded one
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Steps per simulated run
    #[arg(long)]
    horizon: Option<usize>,

    /// Number of islands evolved in parallel
    #[arg(long)]
    islands: Option<usize>,

    /// Individuals per island
    #[arg(long)]
    population: Option<usize>,

    /// Generations per evolution
    #[arg(long)]
    generations: Option<u32>,

    /// Evolutions per island
    #[arg(long)]
    evolutions: Option<u32>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use best/1/bin instead of rand/1/bin
    #[arg(long)]
    best_variant: bool,

    /// Skip replaying the winner
    #[arg(long)]
    no_replay: bool,

    /// Write the full report as JSON to this path ("-" for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut SolverConfig) {
        if let Some(scenario) = self.scenario {
            config.scenario = scenario;
        }
        if let Some(rules) = &self.rules {
            config.rule_base = Some(rules.clone());
        }
        if self.horizon.is_some() {
            config.horizon = self.horizon;
        }
        if let Some(islands) = self.islands {
            config.optimizer.islands = islands;
        }
        if let Some(population) = self.population {
            config.optimizer.population_size = population;
        }
        if let Some(generations) = self.generations {
            config.optimizer.generations = generations;
        }
        if let Some(evolutions) = self.evolutions {
            config.optimizer.evolutions = evolutions;
        }
        if let Some(seed) = self.seed {
            config.optimizer.seed = seed;
        }
        if self.best_variant {
            config.optimizer.variant = DeVariant::Best1Bin;
        }
        if self.no_replay {
            config.replay_best = false;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pm_solver=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::new(),
    };
    args.apply(&mut config);

    tracing::info!(
        "Solving '{}' over {} steps",
        config.scenario.name(),
        config.effective_horizon()
    );

    let solution = pm_solver::run(&config)?;

    match &args.json {
        Some(path) if path.as_os_str() == "-" => {
            println!("{}", serde_json::to_string_pretty(&solution)?);
        }
        Some(path) => {
            std::fs::write(path, serde_json::to_string_pretty(&solution)?)?;
            tracing::info!("Report written to {}", path.display());
            print_summary(&solution);
        }
        None => print_summary(&solution),
    }

    Ok(())
}

fn print_summary(solution: &Solution) {
    println!("Search Result");
    println!("=============");
    println!("Scenario: {} ({} steps)", solution.scenario, solution.horizon);
    println!("Fitness: {:.4} (island {})", solution.fitness, solution.best_island);
    println!("Evaluations: {}", solution.evaluations);
    println!();
    println!("Inclinations:");
    for incl in &solution.inclinations {
        println!("  {:<22} {:.4}", incl.name, incl.value);
    }

    if let Some(replay) = &solution.replay {
        println!();
        println!("Final stats:");
        for stat in &replay.final_stats {
            println!("  {:<22} {:.2}", stat.name, stat.value);
        }
        println!();
        println!("Actions taken:");
        for (action, count) in &replay.histogram {
            println!("  {:<22} {}", action.as_str(), count);
        }
    }

    println!();
    println!("Island champions:");
    for island in &solution.islands {
        println!("  #{:<3} {:.4}", island.island, island.fitness);
    }
}
