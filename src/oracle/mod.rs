//! Decision oracle: scores every candidate action for the current stats

pub mod fuzzy;

pub use fuzzy::FuzzyOracle;

use crate::core::types::{ActionId, InclinationVector, StatVector};

/// Priority of one declared action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPriority {
    pub action: ActionId,
    /// May be NaN when the oracle has nothing to say about this action
    pub priority: f64,
}

/// Oracle output, one entry per declared action in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionPriorities {
    entries: Vec<ActionPriority>,
}

impl ActionPriorities {
    pub fn new(entries: Vec<ActionPriority>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(action, priority)| ActionPriority {
                    action: ActionId::new(action),
                    priority,
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionPriority> {
        self.entries.iter()
    }

    pub fn get(&self, action: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.action.as_str() == action)
            .map(|e| e.priority)
    }

    pub fn first(&self) -> Option<&ActionPriority> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A stateful scorer of actions
///
/// Implementations keep per-call inputs and outputs as instance state, so
/// one instance must never serve two runs at once. `clone` must produce an
/// instance whose mutable state is fully disjoint from the source; the
/// evaluation harness relies on that to run many simulations in parallel
/// from one shared, never-scored template.
pub trait DecisionOracle<const N: usize, const M: usize>: Clone + Send + Sync {
    /// Write the inclinations into the engine's bias inputs
    fn configure(&mut self, inclinations: &InclinationVector<M>);

    /// Forget derived evaluation state from earlier steps
    fn restart(&mut self);

    /// Score every declared action for `stats`
    fn score(&mut self, stats: &StatVector<N>) -> ActionPriorities;

    /// Declared actions, in the order `score` reports them
    fn actions(&self) -> &[ActionId];
}
