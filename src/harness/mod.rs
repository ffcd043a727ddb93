//! Evaluation harness: inclinations in, fitness out
//!
//! Every call clones the template oracle and runs on the clone, which is
//! dropped when the call returns. The template itself is never scored, so
//! concurrent calls share nothing mutable and need no locks.

use crate::actions::ActionCatalog;
use crate::core::error::{Result, SolverError};
use crate::core::types::InclinationVector;
use crate::fitness::FitnessPolicy;
use crate::optimizer::{Bounds, Problem};
use crate::oracle::DecisionOracle;
use crate::simulation::{RunOutcome, Simulation};

pub struct EvaluationHarness<O, F, const N: usize, const M: usize> {
    name: String,
    template: O,
    catalog: ActionCatalog<N>,
    horizon: usize,
    fitness: F,
}

impl<O, F, const N: usize, const M: usize> EvaluationHarness<O, F, N, M>
where
    O: DecisionOracle<N, M>,
    F: FitnessPolicy<N>,
{
    /// Take ownership of a loaded template oracle and a catalog
    ///
    /// Fails with a lookup error if the oracle declares an action the
    /// catalog does not define.
    pub fn new(
        name: impl Into<String>,
        template: O,
        catalog: ActionCatalog<N>,
        horizon: usize,
        fitness: F,
    ) -> Result<Self> {
        if let Some(missing) = template.actions().iter().find(|a| !catalog.contains(a.as_str())) {
            return Err(SolverError::Lookup(missing.to_string()));
        }

        Ok(Self {
            name: name.into(),
            template,
            catalog,
            horizon,
            fitness,
        })
    }

    /// Fitness of one inclination vector; lower is better
    pub fn evaluate(&self, inclinations: &InclinationVector<M>) -> Result<f64> {
        let outcome = self.replay(inclinations)?;
        Ok(self.fitness.fitness(&outcome.final_stats))
    }

    /// Full run on a fresh clone, keeping the trace
    pub fn replay(&self, inclinations: &InclinationVector<M>) -> Result<RunOutcome<N>> {
        let mut oracle = self.template.clone();
        Simulation::new(&self.catalog, self.horizon).run(inclinations, &mut oracle)
    }

    pub fn catalog(&self) -> &ActionCatalog<N> {
        &self.catalog
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }
}

impl<O, F, const N: usize, const M: usize> Problem for EvaluationHarness<O, F, N, M>
where
    O: DecisionOracle<N, M>,
    F: FitnessPolicy<N>,
{
    fn dimension(&self) -> usize {
        M
    }

    fn bounds(&self) -> Bounds {
        Bounds::unit(M)
    }

    fn fitness(&self, x: &[f64]) -> Result<f64> {
        let inclinations = InclinationVector::<M>::from_slice(x)?;
        self.evaluate(&inclinations)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
