//! Twenty-one stats, five inclinations, a full schedule of jobs and classes
//!
//! Deltas are per-day averages of the game's published ranges. The search
//! looks for a raising that ends with a good social reputation and no
//! fighting reputation.

use crate::actions::{ActionCatalog, ActionEffect};
use crate::core::error::Result;
use crate::core::types::{Attribute, StatVector};
use crate::fitness::{DualReputation, FitnessFunction};
use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincessStat {
    Constitution,
    Strength,
    Intelligence,
    Refinement,
    Charisma,
    Morality,
    Faith,
    Sin,
    Sensitivity,
    Stress,
    CombatSkill,
    AttackPower,
    DefensePower,
    MagicSkill,
    MagicPower,
    MagicDefense,
    Decorum,
    ArtSkill,
    Conversation,
    Cooking,
    Cleaning,
}

impl PrincessStat {
    /// Stats that make up social reputation
    pub const SOCIAL: [PrincessStat; 4] = [
        PrincessStat::Decorum,
        PrincessStat::ArtSkill,
        PrincessStat::Conversation,
        PrincessStat::Refinement,
    ];

    /// Stats that make up fighter reputation
    pub const FIGHTER: [PrincessStat; 3] = [
        PrincessStat::CombatSkill,
        PrincessStat::AttackPower,
        PrincessStat::DefensePower,
    ];
}

impl Attribute<21> for PrincessStat {
    const ALL: [Self; 21] = [
        PrincessStat::Constitution,
        PrincessStat::Strength,
        PrincessStat::Intelligence,
        PrincessStat::Refinement,
        PrincessStat::Charisma,
        PrincessStat::Morality,
        PrincessStat::Faith,
        PrincessStat::Sin,
        PrincessStat::Sensitivity,
        PrincessStat::Stress,
        PrincessStat::CombatSkill,
        PrincessStat::AttackPower,
        PrincessStat::DefensePower,
        PrincessStat::MagicSkill,
        PrincessStat::MagicPower,
        PrincessStat::MagicDefense,
        PrincessStat::Decorum,
        PrincessStat::ArtSkill,
        PrincessStat::Conversation,
        PrincessStat::Cooking,
        PrincessStat::Cleaning,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            PrincessStat::Constitution => "constitution",
            PrincessStat::Strength => "strength",
            PrincessStat::Intelligence => "intelligence",
            PrincessStat::Refinement => "refinement",
            PrincessStat::Charisma => "charisma",
            PrincessStat::Morality => "morality",
            PrincessStat::Faith => "faith",
            PrincessStat::Sin => "sin",
            PrincessStat::Sensitivity => "sensitivity",
            PrincessStat::Stress => "stress",
            PrincessStat::CombatSkill => "combat_skill",
            PrincessStat::AttackPower => "attack_power",
            PrincessStat::DefensePower => "defense_power",
            PrincessStat::MagicSkill => "magic_skill",
            PrincessStat::MagicPower => "magic_power",
            PrincessStat::MagicDefense => "magic_defense",
            PrincessStat::Decorum => "decorum",
            PrincessStat::ArtSkill => "art_skill",
            PrincessStat::Conversation => "conversation",
            PrincessStat::Cooking => "cooking",
            PrincessStat::Cleaning => "cleaning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincessInclination {
    Physical,
    Mental,
    Social,
    Artistic,
    Domestic,
}

impl Attribute<5> for PrincessInclination {
    const ALL: [Self; 5] = [
        PrincessInclination::Physical,
        PrincessInclination::Mental,
        PrincessInclination::Social,
        PrincessInclination::Artistic,
        PrincessInclination::Domestic,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            PrincessInclination::Physical => "PhysicalInclination",
            PrincessInclination::Mental => "MentalInclination",
            PrincessInclination::Social => "SocialInclination",
            PrincessInclination::Artistic => "ArtisticInclination",
            PrincessInclination::Domestic => "DomesticInclination",
        }
    }
}

pub struct Princess;

impl Scenario<21, 5> for Princess {
    type Stat = PrincessStat;
    type Inclination = PrincessInclination;

    const NAME: &'static str = "princess";
    const DEFAULT_HORIZON: usize = 120;
    const RULE_BASE: &'static str = include_str!("../../data/rules/princess.toml");

    fn catalog() -> Result<ActionCatalog<21>> {
        use PrincessStat::*;

        ActionCatalog::from_table([
            // Jobs
            ActionEffect::new(
                "Housework",
                StatVector::from_pairs(&[
                    (Cooking, 1.0),
                    (Cleaning, 1.0),
                    (Morality, 0.5),
                    (Stress, 1.0),
                ]),
            ),
            ActionEffect::new(
                "Church",
                StatVector::from_pairs(&[(Faith, 2.0), (Sin, -2.0), (Stress, 1.0)]),
            ),
            ActionEffect::new(
                "Farming",
                StatVector::from_pairs(&[
                    (Constitution, 1.0),
                    (Strength, 1.0),
                    (Refinement, -1.0),
                    (Stress, 3.0),
                ]),
            )
            .requiring(&["constitution", "strength"]),
            ActionEffect::new(
                "Lumberjack",
                StatVector::from_pairs(&[(Strength, 2.0), (Refinement, -2.0), (Stress, 4.0)]),
            )
            .requiring(&["constitution", "strength"]),
            ActionEffect::new(
                "Hunting",
                StatVector::from_pairs(&[
                    (Constitution, 1.0),
                    (CombatSkill, 0.5),
                    (Refinement, -1.0),
                    (Sin, 0.5),
                    (Stress, 3.0),
                ]),
            )
            .requiring(&["constitution", "intelligence"]),
            ActionEffect::new(
                "Bar",
                StatVector::from_pairs(&[
                    (Conversation, 1.0),
                    (Charisma, 1.0),
                    (Refinement, -1.0),
                    (Intelligence, -1.0),
                    (Sin, 1.0),
                    (Stress, 5.0),
                ]),
            )
            .requiring(&["constitution", "charisma"]),
            // Classes
            ActionEffect::new(
                "ScienceClass",
                StatVector::from_pairs(&[
                    (Intelligence, 2.5),
                    (Faith, -0.5),
                    (MagicDefense, -0.5),
                    (Stress, 2.0),
                ]),
            ),
            ActionEffect::new(
                "PoetryClass",
                StatVector::from_pairs(&[
                    (Intelligence, 1.0),
                    (ArtSkill, 1.0),
                    (Refinement, 1.0),
                    (Sensitivity, 1.0),
                    (Stress, 2.0),
                ]),
            ),
            ActionEffect::new(
                "TheologyClass",
                StatVector::from_pairs(&[
                    (Intelligence, 1.0),
                    (Faith, 2.0),
                    (MagicDefense, 1.0),
                    (Stress, 2.0),
                ]),
            ),
            ActionEffect::new(
                "ProtocolClass",
                StatVector::from_pairs(&[(Decorum, 2.5), (Refinement, 2.5), (Stress, 2.0)]),
            ),
            ActionEffect::new(
                "DanceClass",
                StatVector::from_pairs(&[
                    (ArtSkill, 2.0),
                    (Constitution, 1.0),
                    (Charisma, 1.0),
                    (Stress, 2.0),
                ]),
            ),
            ActionEffect::new(
                "PaintingClass",
                StatVector::from_pairs(&[(ArtSkill, 2.0), (Sensitivity, 1.0), (Stress, 2.0)]),
            ),
            ActionEffect::new(
                "FencingClass",
                StatVector::from_pairs(&[(CombatSkill, 2.0), (AttackPower, 1.0), (Stress, 2.0)]),
            ),
            ActionEffect::new(
                "FightingClass",
                StatVector::from_pairs(&[(CombatSkill, 1.0), (DefensePower, 2.0), (Stress, 2.0)]),
            ),
            ActionEffect::new(
                "MagicClass",
                StatVector::from_pairs(&[
                    (MagicSkill, 2.0),
                    (MagicPower, 1.0),
                    (Faith, -1.0),
                    (Stress, 2.0),
                ]),
            ),
            ActionEffect::new("Rest", StatVector::from_pairs(&[(Stress, -5.0)])),
        ])
    }

    fn default_fitness() -> Result<FitnessFunction<21>> {
        let policy =
            DualReputation::<21>::from_attributes(&PrincessStat::SOCIAL, &PrincessStat::FIGHTER)?;
        Ok(policy.into())
    }
}
