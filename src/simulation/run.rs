//! Step and run loop
//!
//! A run is strictly sequential: step `i + 1` reads the stats step `i`
//! produced, so the only parallelism available is across runs.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::actions::ActionCatalog;
use crate::core::error::{Result, SolverError};
use crate::core::types::{ActionId, InclinationVector, StatVector};
use crate::oracle::DecisionOracle;
use crate::simulation::action_select::select_action;

/// Actions taken during one run, one per step
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationTrace {
    actions: Vec<ActionId>,
}

impl SimulationTrace {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            actions: Vec::with_capacity(steps),
        }
    }

    pub fn push(&mut self, action: ActionId) {
        self.actions.push(action);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// How often each action was taken
    pub fn histogram(&self) -> BTreeMap<ActionId, usize> {
        let mut counts = BTreeMap::new();
        for action in &self.actions {
            *counts.entry(action.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Result of a full run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome<const N: usize> {
    pub trace: SimulationTrace,
    pub final_stats: StatVector<N>,
}

/// Fixed-horizon simulation over a read-only catalog
#[derive(Debug, Clone, Copy)]
pub struct Simulation<'a, const N: usize> {
    catalog: &'a ActionCatalog<N>,
    horizon: usize,
}

impl<'a, const N: usize> Simulation<'a, N> {
    pub fn new(catalog: &'a ActionCatalog<N>, horizon: usize) -> Self {
        Self { catalog, horizon }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Ask the oracle, pick an action, apply its delta
    ///
    /// The only failure is an oracle action absent from the catalog, or an
    /// oracle that declares no actions at all.
    pub fn step<const M: usize, O: DecisionOracle<N, M>>(
        &self,
        stats: &StatVector<N>,
        oracle: &mut O,
    ) -> Result<(ActionId, StatVector<N>)> {
        let priorities = oracle.score(stats);
        let action = select_action(&priorities)
            .ok_or_else(|| {
                SolverError::Configuration("decision oracle declares no actions".into())
            })?
            .clone();
        let effect = self.catalog.lookup(action.as_str())?;
        Ok((action, stats + &effect.delta))
    }

    /// Run exactly `horizon` steps from the zero vector
    pub fn run<const M: usize, O: DecisionOracle<N, M>>(
        &self,
        inclinations: &InclinationVector<M>,
        oracle: &mut O,
    ) -> Result<RunOutcome<N>> {
        oracle.configure(inclinations);
        oracle.restart();

        let mut stats = StatVector::zero();
        let mut trace = SimulationTrace::with_capacity(self.horizon);

        for step in 0..self.horizon {
            let (action, next) = self.step(&stats, oracle)?;
            tracing::trace!("Step {}: {}", step, action);
            trace.push(action);
            stats = next;
        }

        Ok(RunOutcome {
            trace,
            final_stats: stats,
        })
    }
}
