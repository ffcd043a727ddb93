//! Island-model global optimizer
//!
//! Self-adaptive differential evolution runs independently on each island;
//! islands are evolved in parallel and report their own champions.

pub mod archipelago;
pub mod population;
pub mod sade;
pub mod schwefel;

pub use archipelago::{Archipelago, IslandChampion};
pub use population::{Individual, Population};
pub use sade::{DeVariant, Sade};
pub use schwefel::Schwefel;

use rand::Rng;
use serde::Serialize;

use crate::core::error::{Result, SolverError};

/// A bounded, single-objective minimization problem
///
/// `fitness` is called concurrently from every island, hence `Sync`.
pub trait Problem: Sync {
    fn dimension(&self) -> usize;

    fn bounds(&self) -> Bounds;

    /// Objective value of `x`; lower is better
    fn fitness(&self, x: &[f64]) -> Result<f64>;

    fn name(&self) -> String {
        "problem".to_string()
    }
}

/// Inclusive per-dimension box constraints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Bounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(SolverError::Configuration(format!(
                "bounds have {} lower and {} upper components",
                lower.len(),
                upper.len()
            )));
        }
        if let Some(i) = (0..lower.len()).find(|&i| !(lower[i] <= upper[i])) {
            return Err(SolverError::Configuration(format!(
                "lower bound {} exceeds upper bound {} in dimension {}",
                lower[i], upper[i], i
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn uniform(dimension: usize, lower: f64, upper: f64) -> Self {
        Self {
            lower: vec![lower; dimension],
            upper: vec![upper; dimension],
        }
    }

    /// `[0, 1]` in every dimension
    pub fn unit(dimension: usize) -> Self {
        Self::uniform(dimension, 0.0, 1.0)
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }

    /// Uniform draw for one component
    pub fn sample_component<R: Rng>(&self, i: usize, rng: &mut R) -> f64 {
        let (lo, hi) = (self.lower[i], self.upper[i]);
        if lo == hi {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }

    /// Uniform draw inside the box
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dimension())
            .map(|i| self.sample_component(i, rng))
            .collect()
    }
}
