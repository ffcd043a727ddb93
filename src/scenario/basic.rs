//! Four stats, two inclinations, four actions
//!
//! The smallest model: a hunter, a lumberjack and two classes. The search
//! looks for inclinations that raise intelligence past a target.

use crate::actions::{ActionCatalog, ActionEffect};
use crate::core::error::Result;
use crate::core::types::{Attribute, StatVector};
use crate::fitness::{FitnessFunction, TargetDeviation};
use crate::scenario::Scenario;

/// Intelligence the default fitness aims for
pub const INTELLIGENCE_TARGET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicStat {
    Strength,
    Constitution,
    Intelligence,
    Refinement,
}

impl Attribute<4> for BasicStat {
    const ALL: [Self; 4] = [
        BasicStat::Strength,
        BasicStat::Constitution,
        BasicStat::Intelligence,
        BasicStat::Refinement,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            BasicStat::Strength => "strength",
            BasicStat::Constitution => "constitution",
            BasicStat::Intelligence => "intelligence",
            BasicStat::Refinement => "refinement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicInclination {
    Physical,
    Mental,
}

impl Attribute<2> for BasicInclination {
    const ALL: [Self; 2] = [BasicInclination::Physical, BasicInclination::Mental];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            BasicInclination::Physical => "PhysicalInclination",
            BasicInclination::Mental => "MentalInclination",
        }
    }
}

pub struct Basic;

impl Scenario<4, 2> for Basic {
    type Stat = BasicStat;
    type Inclination = BasicInclination;

    const NAME: &'static str = "basic";
    const DEFAULT_HORIZON: usize = 100;
    const RULE_BASE: &'static str = include_str!("../../data/rules/basic.toml");

    fn catalog() -> Result<ActionCatalog<4>> {
        use BasicStat::*;

        ActionCatalog::from_table([
            ActionEffect::new(
                "Hunting",
                StatVector::from_pairs(&[(Constitution, 0.01), (Refinement, -0.01)]),
            )
            .requiring(&["constitution", "intelligence"]),
            ActionEffect::new(
                "Lumberjack",
                StatVector::from_pairs(&[(Strength, 0.02), (Refinement, -0.02)]),
            )
            .requiring(&["constitution", "strength"]),
            ActionEffect::new("ScienceClass", StatVector::from_pairs(&[(Intelligence, 0.20)])),
            ActionEffect::new("MannersClass", StatVector::from_pairs(&[(Refinement, 2.0)])),
        ])
    }

    fn default_fitness() -> Result<FitnessFunction<4>> {
        Ok(TargetDeviation::<4>::new(BasicStat::Intelligence, INTELLIGENCE_TARGET).into())
    }
}
