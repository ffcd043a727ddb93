//! Self-adaptive differential evolution
//!
//! Each individual carries its own mutation weight `F` and crossover rate
//! `CR`. Before building a trial vector they are resampled with small
//! probability; a trial that wins greedy selection keeps the parameters that
//! produced it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SolverError};
use crate::optimizer::population::{Individual, Population};
use crate::optimizer::{Bounds, Problem};

const WEIGHT_LOWER: f64 = 0.1;
const WEIGHT_SPAN: f64 = 0.9;
const ADAPT_PROBABILITY: f64 = 0.1;

/// Mutation base and crossover scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeVariant {
    /// `x_r1 + F (x_r2 - x_r3)` with binomial crossover
    #[default]
    Rand1Bin,
    /// `x_best + F (x_r1 - x_r2)` with binomial crossover
    Best1Bin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sade {
    pub generations: u32,
    pub variant: DeVariant,
}

impl Sade {
    pub fn new(generations: u32, variant: DeVariant) -> Self {
        Self {
            generations,
            variant,
        }
    }

    /// Run `generations` generations, replacing members in place
    pub fn evolve<P: Problem, R: Rng>(
        &self,
        mut pop: Population,
        problem: &P,
        rng: &mut R,
    ) -> Result<Population> {
        if pop.len() < 4 {
            return Err(SolverError::Configuration(format!(
                "differential evolution needs at least 4 individuals, got {}",
                pop.len()
            )));
        }

        let bounds = problem.bounds();
        for _ in 0..self.generations {
            for i in 0..pop.len() {
                let weight = if rng.gen::<f64>() < ADAPT_PROBABILITY {
                    WEIGHT_LOWER + rng.gen::<f64>() * WEIGHT_SPAN
                } else {
                    pop.weights[i]
                };
                let crossover = if rng.gen::<f64>() < ADAPT_PROBABILITY {
                    rng.gen::<f64>()
                } else {
                    pop.crossover_rates[i]
                };

                let trial = self.trial_vector(&pop, i, weight, crossover, &bounds, rng);
                let fitness = problem.fitness(&trial)?;
                pop.record_evaluation();

                if fitness <= pop.members()[i].fitness || pop.members()[i].fitness.is_nan() {
                    pop.replace(i, Individual { x: trial, fitness });
                    pop.weights[i] = weight;
                    pop.crossover_rates[i] = crossover;
                }
            }
        }
        Ok(pop)
    }

    fn trial_vector<R: Rng>(
        &self,
        pop: &Population,
        target: usize,
        weight: f64,
        crossover: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Vec<f64> {
        let [r1, r2, r3] = distinct_others(pop.len(), target, rng);
        let members = pop.members();
        let (base, a, b) = match self.variant {
            DeVariant::Rand1Bin => (&members[r1].x, &members[r2].x, &members[r3].x),
            DeVariant::Best1Bin => (&pop.champion().x, &members[r1].x, &members[r2].x),
        };

        let current = &members[target].x;
        let dimension = current.len();
        let forced = rng.gen_range(0..dimension.max(1));

        (0..dimension)
            .map(|j| {
                if j == forced || rng.gen::<f64>() < crossover {
                    let v = base[j] + weight * (a[j] - b[j]);
                    if v < bounds.lower[j] || v > bounds.upper[j] {
                        bounds.sample_component(j, rng)
                    } else {
                        v
                    }
                } else {
                    current[j]
                }
            })
            .collect()
    }
}

/// Three distinct indices in `0..len`, none equal to `target`
fn distinct_others<R: Rng>(len: usize, target: usize, rng: &mut R) -> [usize; 3] {
    let mut picked = [target; 3];
    for k in 0..3 {
        loop {
            let candidate = rng.gen_range(0..len);
            if candidate != target && !picked[..k].contains(&candidate) {
                picked[k] = candidate;
                break;
            }
        }
    }
    picked
}
