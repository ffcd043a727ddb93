//! Action definitions and catalog

use ahash::AHashMap;
use serde::Serialize;

use crate::core::error::{Result, SolverError};
use crate::core::types::{ActionId, StatVector};

/// What taking an action once does to the character
#[derive(Debug, Clone, Serialize)]
pub struct ActionEffect<const N: usize> {
    pub id: ActionId,
    pub delta: StatVector<N>,
    /// Stats the source material lists as prerequisites
    ///
    /// Descriptive only. Eligibility is whatever the rule base encodes.
    pub requires: Vec<&'static str>,
}

impl<const N: usize> ActionEffect<N> {
    pub fn new(id: &str, delta: StatVector<N>) -> Self {
        Self {
            id: ActionId::new(id),
            delta,
            requires: Vec::new(),
        }
    }

    pub fn requiring(mut self, stats: &[&'static str]) -> Self {
        self.requires.extend_from_slice(stats);
        self
    }
}

/// Read-only mapping from action id to effect, in declaration order
#[derive(Debug, Clone)]
pub struct ActionCatalog<const N: usize> {
    effects: Vec<ActionEffect<N>>,
    index: AHashMap<ActionId, usize>,
}

impl<const N: usize> ActionCatalog<N> {
    /// Build a catalog, rejecting duplicate identifiers
    pub fn from_table(entries: impl IntoIterator<Item = ActionEffect<N>>) -> Result<Self> {
        let mut effects = Vec::new();
        let mut index = AHashMap::new();

        for effect in entries {
            if index.contains_key(effect.id.as_str()) {
                return Err(SolverError::DuplicateAction(effect.id.to_string()));
            }
            index.insert(effect.id.clone(), effects.len());
            effects.push(effect);
        }

        Ok(Self { effects, index })
    }

    /// Find the effect for `id`
    ///
    /// A miss means the rule base declares an output with no catalog entry.
    pub fn lookup(&self, id: &str) -> Result<&ActionEffect<N>> {
        self.index
            .get(id)
            .map(|&i| &self.effects[i])
            .ok_or_else(|| SolverError::Lookup(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ActionId> {
        self.effects.iter().map(|e| &e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionEffect<N>> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
