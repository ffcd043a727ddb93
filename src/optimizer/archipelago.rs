//! Independent islands evolved in parallel
//!
//! Each island owns its population and a `ChaCha8Rng` seeded with
//! `seed + island`, so results do not depend on thread scheduling.
//! Islands never exchange individuals.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::core::config::OptimizerConfig;
use crate::core::error::Result;
use crate::optimizer::population::Population;
use crate::optimizer::sade::Sade;
use crate::optimizer::Problem;

/// Best candidate one island found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IslandChampion {
    pub island: usize,
    pub x: Vec<f64>,
    pub fitness: f64,
    pub evaluations: u64,
}

#[derive(Debug, Clone)]
pub struct Archipelago {
    islands: usize,
    population_size: usize,
    evolutions: u32,
    seed: u64,
    algorithm: Sade,
}

impl Archipelago {
    pub fn new(config: &OptimizerConfig) -> Self {
        Self {
            islands: config.islands,
            population_size: config.population_size,
            evolutions: config.evolutions,
            seed: config.seed,
            algorithm: Sade::new(config.generations, config.variant),
        }
    }

    /// Evolve every island and return their champions in island order
    ///
    /// The first island error aborts the whole search.
    pub fn evolve<P: Problem>(&self, problem: &P) -> Result<Vec<IslandChampion>> {
        tracing::info!(
            "Evolving {} islands of {} on '{}' ({} x {} generations)",
            self.islands,
            self.population_size,
            problem.name(),
            self.evolutions,
            self.algorithm.generations
        );

        (0..self.islands)
            .into_par_iter()
            .map(|island| self.evolve_island(problem, island))
            .collect()
    }

    fn evolve_island<P: Problem>(&self, problem: &P, island: usize) -> Result<IslandChampion> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(island as u64));
        let mut pop = Population::random(problem, self.population_size, &mut rng)?;

        for evolution in 0..self.evolutions {
            pop = self.algorithm.evolve(pop, problem, &mut rng)?;
            tracing::trace!(
                "Island {} evolution {}: best {}",
                island,
                evolution,
                pop.champion().fitness
            );
        }

        let champion = pop.champion();
        tracing::debug!("Island {} champion: {}", island, champion.fitness);

        Ok(IslandChampion {
            island,
            x: champion.x.clone(),
            fitness: champion.fitness,
            evaluations: pop.evaluations(),
        })
    }
}
