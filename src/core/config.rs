//! Solver configuration with documented defaults
//!
//! Every knob of a search run is collected here. Values load from a TOML
//! file; anything the file leaves out keeps its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SolverError};
use crate::fitness::FitnessSpec;
use crate::optimizer::DeVariant;
use crate::scenario::ScenarioKind;

/// Configuration for one search run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Which character model to simulate
    pub scenario: ScenarioKind,

    /// Number of simulation steps per run
    ///
    /// `None` uses the scenario's own horizon. Every evaluation costs one
    /// oracle pass per step, so this bounds search throughput directly.
    pub horizon: Option<usize>,

    /// Rule base to load instead of the scenario's embedded one
    pub rule_base: Option<PathBuf>,

    /// Fitness policy to use instead of the scenario's own
    pub fitness: Option<FitnessSpec>,

    /// Re-run the winning inclinations once to recover their action trace
    pub replay_best: bool,

    pub optimizer: OptimizerConfig,
}

/// Island-model differential evolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Independent populations evolved in parallel
    pub islands: usize,

    /// Individuals per island
    ///
    /// Differential evolution draws three distinct partners besides the
    /// target, so fewer than 4 cannot form a trial vector.
    pub population_size: usize,

    /// Generations per evolution call
    pub generations: u32,

    /// How many times each island is evolved
    pub evolutions: u32,

    /// Base seed; island `i` uses `seed + i`
    pub seed: u64,

    pub variant: DeVariant,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioKind::Basic,
            horizon: None,
            rule_base: None,
            fitness: None,
            replay_best: true,
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            islands: 16,
            population_size: 20,
            generations: 100,
            evolutions: 10,
            seed: 42,
            variant: DeVariant::Rand1Bin,
        }
    }
}

impl SolverConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SolverConfig = toml::from_str(content)?;
        config.validate().map_err(SolverError::Configuration)?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.horizon == Some(0) {
            return Err("horizon must be at least 1 step".into());
        }

        if self.optimizer.islands == 0 {
            return Err("islands must be at least 1".into());
        }

        if self.optimizer.population_size < 4 {
            return Err(format!(
                "population_size ({}) must be at least 4 for differential evolution",
                self.optimizer.population_size
            ));
        }

        if self.optimizer.generations == 0 || self.optimizer.evolutions == 0 {
            return Err("generations and evolutions must be positive".into());
        }

        Ok(())
    }

    /// Horizon to run with, falling back to the scenario default
    pub fn effective_horizon(&self) -> usize {
        self.horizon.unwrap_or_else(|| self.scenario.default_horizon())
    }
}
