//! End-to-end tests for the solver
//!
//! Configuration goes in, a serialisable report comes out:
//! - seeded searches are reproducible
//! - rule base and fitness overrides from config are honoured
//! - broken rule bases fail before any simulation runs

use std::path::PathBuf;

use pm_solver::core::config::{OptimizerConfig, SolverConfig};
use pm_solver::fitness::FitnessSpec;
use pm_solver::rules::RuleBaseError;
use pm_solver::scenario::{Basic, Scenario, ScenarioKind};
use pm_solver::SolverError;

fn quick(scenario: ScenarioKind) -> SolverConfig {
    SolverConfig {
        scenario,
        horizon: Some(25),
        optimizer: OptimizerConfig {
            islands: 3,
            population_size: 8,
            generations: 5,
            evolutions: 2,
            seed: 7,
            ..OptimizerConfig::default()
        },
        ..SolverConfig::default()
    }
}

fn scratch_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pm_solver_tests_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_seeded_search_is_reproducible() {
    let a = pm_solver::run(&quick(ScenarioKind::Princess)).unwrap();
    let b = pm_solver::run(&quick(ScenarioKind::Princess)).unwrap();
    assert_eq!(a.fitness.to_bits(), b.fitness.to_bits());
    assert_eq!(a.islands, b.islands);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_search_finds_overshoot_on_basic() {
    let mut config = quick(ScenarioKind::Basic);
    config.horizon = None;
    let solution = pm_solver::run(&config).unwrap();
    assert_eq!(solution.horizon, 100);
    // Pure study reaches intelligence 20 in 100 steps
    assert!(solution.fitness < 0.0, "fitness {}", solution.fitness);
}

#[test]
fn test_rule_base_file_override() {
    let path = scratch_file("basic_override.toml", Basic::RULE_BASE);
    let mut config = quick(ScenarioKind::Basic);
    config.rule_base = Some(path);
    let solution = pm_solver::run(&config).unwrap();
    assert_eq!(solution.scenario, "basic");
}

#[test]
fn test_unready_rule_base_fails_fast() {
    // Drop every rule so the block is empty
    let broken = Basic::RULE_BASE
        .lines()
        .filter(|line| !line.trim_start().starts_with("\"if "))
        .collect::<Vec<_>>()
        .join("\n");
    let path = scratch_file("basic_empty_block.toml", &broken);
    let mut config = quick(ScenarioKind::Basic);
    config.rule_base = Some(path);

    let err = pm_solver::run(&config).unwrap_err();
    assert!(matches!(err, SolverError::Configuration(msg) if msg.contains("not ready")));
}

#[test]
fn test_rule_base_missing_stat_input() {
    // Rename the input and every rule mentioning it, so the rule base
    // itself stays valid and only the stat slot is missing
    let renamed = Basic::RULE_BASE.replace("refinement", "poise");
    let path = scratch_file("basic_missing_input.toml", &renamed);
    let mut config = quick(ScenarioKind::Basic);
    config.rule_base = Some(path);

    let err = pm_solver::run(&config).unwrap_err();
    assert!(matches!(err, SolverError::Configuration(msg) if msg.contains("refinement")));
}

#[test]
fn test_missing_rule_base_file_is_io_error() {
    let mut config = quick(ScenarioKind::Basic);
    config.rule_base = Some(PathBuf::from("/nonexistent/rules.toml"));
    let err = pm_solver::run(&config).unwrap_err();
    assert!(matches!(err, SolverError::RuleBase(RuleBaseError::Io(_))));
}

#[test]
fn test_fitness_override_changes_objective() {
    let mut config = quick(ScenarioKind::Basic);
    config.fitness = Some(FitnessSpec::TargetDeviation {
        attribute: "refinement".into(),
        target: 0.0,
    });
    let solution = pm_solver::run(&config).unwrap();
    let replay = solution.replay.unwrap();
    let refinement = replay
        .final_stats
        .iter()
        .find(|s| s.name == "refinement")
        .unwrap()
        .value;
    assert_eq!(solution.fitness, -refinement);
}

#[test]
fn test_unknown_fitness_stat_rejected() {
    let mut config = quick(ScenarioKind::Basic);
    config.fitness = Some(FitnessSpec::TargetDeviation {
        attribute: "luck".into(),
        target: 1.0,
    });
    assert!(matches!(
        pm_solver::run(&config),
        Err(SolverError::Configuration(_))
    ));
}

#[test]
fn test_config_file_round_trip() {
    let path = scratch_file(
        "solver.toml",
        r#"
scenario = "basic"
horizon = 10
replay_best = false

[optimizer]
islands = 2
population_size = 5
generations = 2
evolutions = 1
variant = "best1_bin"
"#,
    );
    let config = SolverConfig::load(&path).unwrap();
    let solution = pm_solver::run(&config).unwrap();
    assert_eq!(solution.horizon, 10);
    assert_eq!(solution.islands.len(), 2);
    assert!(solution.replay.is_none());
}
