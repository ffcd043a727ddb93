//! Character models: stats, inclinations, actions and their rule base
//!
//! A scenario fixes the two vector dimensions at compile time and bundles
//! everything needed to build an evaluation harness for them.

pub mod basic;
pub mod princess;

pub use basic::{Basic, BasicInclination, BasicStat};
pub use princess::{Princess, PrincessInclination, PrincessStat};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::actions::ActionCatalog;
use crate::core::error::Result;
use crate::core::types::Attribute;
use crate::fitness::{FitnessFunction, FitnessSpec};
use crate::harness::EvaluationHarness;
use crate::oracle::FuzzyOracle;

/// Harness every scenario produces
pub type ScenarioHarness<const N: usize, const M: usize> =
    EvaluationHarness<FuzzyOracle<N, M>, FitnessFunction<N>, N, M>;

/// Scenario selector used by configuration files and the command line
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[default]
    Basic,
    Princess,
}

impl ScenarioKind {
    pub fn name(self) -> &'static str {
        match self {
            ScenarioKind::Basic => <Basic as Scenario<4, 2>>::NAME,
            ScenarioKind::Princess => <Princess as Scenario<21, 5>>::NAME,
        }
    }

    pub fn default_horizon(self) -> usize {
        match self {
            ScenarioKind::Basic => <Basic as Scenario<4, 2>>::DEFAULT_HORIZON,
            ScenarioKind::Princess => <Princess as Scenario<21, 5>>::DEFAULT_HORIZON,
        }
    }
}

pub trait Scenario<const N: usize, const M: usize> {
    type Stat: Attribute<N>;
    type Inclination: Attribute<M>;

    const NAME: &'static str;
    const DEFAULT_HORIZON: usize;
    /// Embedded TOML rule base
    const RULE_BASE: &'static str;

    fn catalog() -> Result<ActionCatalog<N>>;

    fn default_fitness() -> Result<FitnessFunction<N>>;

    /// Load the oracle, then wire it to the catalog and a fitness policy
    ///
    /// `rule_base` overrides the embedded rules; `fitness` overrides the
    /// scenario's default policy.
    fn build_harness(
        rule_base: Option<&Path>,
        horizon: usize,
        fitness: Option<&FitnessSpec>,
    ) -> Result<ScenarioHarness<N, M>> {
        let oracle = match rule_base {
            Some(path) => {
                tracing::info!("Loading rule base from {}", path.display());
                FuzzyOracle::load::<Self::Stat, Self::Inclination>(path)?
            }
            None => FuzzyOracle::from_rule_base::<Self::Stat, Self::Inclination>(Self::RULE_BASE)?,
        };

        let fitness = match fitness {
            Some(spec) => spec.resolve::<Self::Stat, N>()?,
            None => Self::default_fitness()?,
        };

        EvaluationHarness::new(Self::NAME, oracle, Self::catalog()?, horizon, fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip_through_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            scenario: ScenarioKind,
        }
        let w: Wrapper = toml::from_str("scenario = \"princess\"").unwrap();
        assert_eq!(w.scenario, ScenarioKind::Princess);
        assert_eq!(w.scenario.name(), "princess");
    }

    #[test]
    fn test_default_horizons_are_positive() {
        assert!(ScenarioKind::Basic.default_horizon() > 0);
        assert!(ScenarioKind::Princess.default_horizon() > 0);
    }
}
