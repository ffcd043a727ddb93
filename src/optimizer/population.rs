//! Island population and champion tracking

use ordered_float::OrderedFloat;
use rand::Rng;
use serde::Serialize;

use crate::core::error::{Result, SolverError};
use crate::optimizer::Problem;

/// Initial mutation weight of every individual
pub const INITIAL_WEIGHT: f64 = 0.5;
/// Initial crossover rate of every individual
pub const INITIAL_CROSSOVER: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    pub x: Vec<f64>,
    pub fitness: f64,
}

/// Candidates of one island plus their self-adapted DE parameters
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Individual>,
    pub(crate) weights: Vec<f64>,
    pub(crate) crossover_rates: Vec<f64>,
    champion: usize,
    evaluations: u64,
}

impl Population {
    /// Draw `size` uniform candidates and evaluate each once
    pub fn random<P: Problem, R: Rng>(problem: &P, size: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(SolverError::Configuration("population must not be empty".into()));
        }

        let bounds = problem.bounds();
        let mut members = Vec::with_capacity(size);
        for _ in 0..size {
            let x = bounds.sample(rng);
            let fitness = problem.fitness(&x)?;
            members.push(Individual { x, fitness });
        }

        let mut population = Self {
            members,
            weights: vec![INITIAL_WEIGHT; size],
            crossover_rates: vec![INITIAL_CROSSOVER; size],
            champion: 0,
            evaluations: size as u64,
        };
        population.refresh_champion();
        Ok(population)
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Best individual so far; NaN fitness never wins
    pub fn champion(&self) -> &Individual {
        &self.members[self.champion]
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub(crate) fn record_evaluation(&mut self) {
        self.evaluations += 1;
    }

    /// Put `candidate` in slot `i`, keeping the champion index current
    pub(crate) fn replace(&mut self, i: usize, candidate: Individual) {
        let better = OrderedFloat(candidate.fitness) < OrderedFloat(self.champion().fitness);
        self.members[i] = candidate;
        if better {
            self.champion = i;
        } else if i == self.champion {
            self.refresh_champion();
        }
    }

    fn refresh_champion(&mut self) {
        self.champion = self
            .members
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| OrderedFloat(m.fitness))
            .map(|(i, _)| i)
            .unwrap_or(0);
    }
}
