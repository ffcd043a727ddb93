//! Search driver and report
//!
//! Evolves the archipelago over a scenario harness, takes the island
//! champion with the lowest fitness and replays it once to recover the
//! action trace.

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::config::SolverConfig;
use crate::core::error::{Result, SolverError};
use crate::core::types::{ActionId, Attribute, InclinationVector};
use crate::fitness::FitnessPolicy;
use crate::harness::EvaluationHarness;
use crate::optimizer::{Archipelago, IslandChampion, Problem};
use crate::oracle::DecisionOracle;
use crate::scenario::{Basic, Princess, Scenario, ScenarioKind};
use crate::simulation::SimulationTrace;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: &'static str,
    pub value: f64,
}

/// Replay of the winning inclinations
#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    pub final_stats: Vec<NamedValue>,
    pub trace: SimulationTrace,
    pub histogram: BTreeMap<ActionId, usize>,
}

/// Outcome of a full search
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub scenario: String,
    pub horizon: usize,
    pub inclinations: Vec<NamedValue>,
    pub fitness: f64,
    pub best_island: usize,
    pub evaluations: u64,
    pub islands: Vec<IslandChampion>,
    pub replay: Option<Replay>,
}

/// Build the configured scenario and solve it
pub fn run(config: &SolverConfig) -> Result<Solution> {
    config.validate().map_err(SolverError::Configuration)?;

    match config.scenario {
        ScenarioKind::Basic => solve_scenario::<Basic, 4, 2>(config),
        ScenarioKind::Princess => solve_scenario::<Princess, 21, 5>(config),
    }
}

fn solve_scenario<S, const N: usize, const M: usize>(config: &SolverConfig) -> Result<Solution>
where
    S: Scenario<N, M>,
{
    let harness = S::build_harness(
        config.rule_base.as_deref(),
        config.effective_horizon(),
        config.fitness.as_ref(),
    )?;
    solve::<S::Stat, S::Inclination, _, _, N, M>(&harness, config)
}

/// Run the archipelago over `harness` and report the best island
pub fn solve<S, I, O, F, const N: usize, const M: usize>(
    harness: &EvaluationHarness<O, F, N, M>,
    config: &SolverConfig,
) -> Result<Solution>
where
    S: Attribute<N>,
    I: Attribute<M>,
    O: DecisionOracle<N, M>,
    F: FitnessPolicy<N>,
{
    let islands = Archipelago::new(&config.optimizer).evolve(harness)?;

    let best = islands
        .iter()
        .min_by_key(|c| OrderedFloat(c.fitness))
        .ok_or_else(|| SolverError::Configuration("archipelago has no islands".into()))?;

    tracing::info!("Best fitness {} on island {}", best.fitness, best.island);

    let (fitness, best_island) = (best.fitness, best.island);
    let inclinations = InclinationVector::<M>::from_slice(&best.x)?;

    let replay = if config.replay_best {
        let outcome = harness.replay(&inclinations)?;
        let histogram = outcome.trace.histogram();
        for (action, count) in &histogram {
            tracing::debug!("{}: {} steps", action, count);
        }
        Some(Replay {
            final_stats: named::<S, N>(outcome.final_stats.as_array()),
            trace: outcome.trace,
            histogram,
        })
    } else {
        None
    };

    Ok(Solution {
        scenario: harness.name(),
        horizon: harness.horizon(),
        inclinations: named::<I, M>(inclinations.as_array()),
        fitness,
        best_island,
        evaluations: islands.iter().map(|c| c.evaluations).sum(),
        islands,
        replay,
    })
}

fn named<A: Attribute<K>, const K: usize>(values: &[f64; K]) -> Vec<NamedValue> {
    A::ALL
        .iter()
        .map(|a| NamedValue {
            name: a.name(),
            value: values[a.index()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OptimizerConfig;

    fn small_config(scenario: ScenarioKind) -> SolverConfig {
        SolverConfig {
            scenario,
            horizon: Some(30),
            optimizer: OptimizerConfig {
                islands: 2,
                population_size: 6,
                generations: 3,
                evolutions: 1,
                seed: 1,
                ..OptimizerConfig::default()
            },
            ..SolverConfig::default()
        }
    }

    #[test]
    fn test_basic_solution_is_consistent() {
        let solution = run(&small_config(ScenarioKind::Basic)).unwrap();
        assert_eq!(solution.islands.len(), 2);
        assert_eq!(solution.inclinations.len(), 2);
        assert_eq!(solution.inclinations[0].name, "PhysicalInclination");
        let min = solution
            .islands
            .iter()
            .map(|c| c.fitness)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(solution.fitness, min);

        let replay = solution.replay.unwrap();
        assert_eq!(replay.trace.len(), 30);
        assert_eq!(replay.histogram.values().sum::<usize>(), 30);
        let intelligence = replay
            .final_stats
            .iter()
            .find(|s| s.name == "intelligence")
            .unwrap()
            .value;
        assert_eq!(solution.fitness, crate::scenario::basic::INTELLIGENCE_TARGET - intelligence);
    }

    #[test]
    fn test_replay_can_be_skipped() {
        let mut config = small_config(ScenarioKind::Basic);
        config.replay_best = false;
        let solution = run(&config).unwrap();
        assert!(solution.replay.is_none());
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let mut config = small_config(ScenarioKind::Basic);
        config.optimizer.population_size = 2;
        assert!(matches!(run(&config), Err(SolverError::Configuration(_))));
    }

    #[test]
    fn test_solution_serializes() {
        let solution = run(&small_config(ScenarioKind::Princess)).unwrap();
        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["scenario"], "princess");
        assert_eq!(json["inclinations"].as_array().unwrap().len(), 5);
        assert_eq!(json["replay"]["final_stats"].as_array().unwrap().len(), 21);
    }
}
