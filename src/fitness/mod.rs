//! Fitness policies over a run's final stats
//!
//! Every policy is a pure function of the final stat vector and follows the
//! optimizer's convention: lower is better.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SolverError};
use crate::core::types::{Attribute, StatVector};

/// Social reputation a character must reach for the social term to vanish
pub const DEFAULT_SOCIAL_THRESHOLD: f64 = 100.0;

pub trait FitnessPolicy<const N: usize>: Send + Sync {
    fn fitness(&self, stats: &StatVector<N>) -> f64;
}

/// `target - stats[index]`
///
/// Overshooting the target goes negative and keeps improving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDeviation<const N: usize> {
    index: usize,
    target: f64,
}

impl<const N: usize> TargetDeviation<N> {
    pub fn new<A: Attribute<N>>(attribute: A, target: f64) -> Self {
        Self {
            index: attribute.index(),
            target,
        }
    }

    pub fn from_index(index: usize, target: f64) -> Result<Self> {
        if index >= N {
            return Err(SolverError::Configuration(format!(
                "tracked index {} is out of range for {} stats",
                index, N
            )));
        }
        Ok(Self { index, target })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl<const N: usize> FitnessPolicy<N> for TargetDeviation<N> {
    fn fitness(&self, stats: &StatVector<N>) -> f64 {
        self.target - stats[self.index]
    }
}

/// `max(0, threshold - social) + max(0, fighter)`
///
/// Zero only once social reputation reaches the threshold while fighter
/// reputation stays at or below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DualReputation<const N: usize> {
    social: Vec<usize>,
    fighter: Vec<usize>,
    social_threshold: f64,
}

impl<const N: usize> DualReputation<N> {
    /// Index sets must be in range, free of repeats and disjoint
    pub fn new(social: Vec<usize>, fighter: Vec<usize>) -> Result<Self> {
        let mut seen = [false; N];
        for &i in social.iter().chain(fighter.iter()) {
            if i >= N {
                return Err(SolverError::Configuration(format!(
                    "reputation index {} is out of range for {} stats",
                    i, N
                )));
            }
            if seen[i] {
                return Err(SolverError::Configuration(format!(
                    "reputation index {} appears more than once",
                    i
                )));
            }
            seen[i] = true;
        }
        Ok(Self {
            social,
            fighter,
            social_threshold: DEFAULT_SOCIAL_THRESHOLD,
        })
    }

    pub fn from_attributes<A: Attribute<N>>(social: &[A], fighter: &[A]) -> Result<Self> {
        Self::new(
            social.iter().map(|a| a.index()).collect(),
            fighter.iter().map(|a| a.index()).collect(),
        )
    }

    pub fn with_social_threshold(mut self, threshold: f64) -> Self {
        self.social_threshold = threshold;
        self
    }

    pub fn social_score(&self, stats: &StatVector<N>) -> f64 {
        stats.sum_of(&self.social)
    }

    pub fn fighter_score(&self, stats: &StatVector<N>) -> f64 {
        stats.sum_of(&self.fighter)
    }
}

impl<const N: usize> FitnessPolicy<N> for DualReputation<N> {
    fn fitness(&self, stats: &StatVector<N>) -> f64 {
        let social = self.social_score(stats);
        let fighter = self.fighter_score(stats);
        (self.social_threshold - social).max(0.0) + fighter.max(0.0)
    }
}

/// Either policy, chosen at configuration time
#[derive(Debug, Clone, PartialEq)]
pub enum FitnessFunction<const N: usize> {
    TargetDeviation(TargetDeviation<N>),
    DualReputation(DualReputation<N>),
}

impl<const N: usize> FitnessPolicy<N> for FitnessFunction<N> {
    fn fitness(&self, stats: &StatVector<N>) -> f64 {
        match self {
            FitnessFunction::TargetDeviation(p) => p.fitness(stats),
            FitnessFunction::DualReputation(p) => p.fitness(stats),
        }
    }
}

impl<const N: usize> From<TargetDeviation<N>> for FitnessFunction<N> {
    fn from(policy: TargetDeviation<N>) -> Self {
        FitnessFunction::TargetDeviation(policy)
    }
}

impl<const N: usize> From<DualReputation<N>> for FitnessFunction<N> {
    fn from(policy: DualReputation<N>) -> Self {
        FitnessFunction::DualReputation(policy)
    }
}

/// Fitness policy as written in a config file, with stats named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FitnessSpec {
    TargetDeviation {
        attribute: String,
        target: f64,
    },
    DualReputation {
        social: Vec<String>,
        fighter: Vec<String>,
        #[serde(default)]
        social_threshold: Option<f64>,
    },
}

impl FitnessSpec {
    /// Resolve stat names against a scenario's attributes
    pub fn resolve<A: Attribute<N>, const N: usize>(&self) -> Result<FitnessFunction<N>> {
        match self {
            FitnessSpec::TargetDeviation { attribute, target } => {
                let attr = lookup_attribute::<A, N>(attribute)?;
                Ok(TargetDeviation::new(attr, *target).into())
            }
            FitnessSpec::DualReputation {
                social,
                fighter,
                social_threshold,
            } => {
                let social = social
                    .iter()
                    .map(|name| lookup_attribute::<A, N>(name))
                    .collect::<Result<Vec<_>>>()?;
                let fighter = fighter
                    .iter()
                    .map(|name| lookup_attribute::<A, N>(name))
                    .collect::<Result<Vec<_>>>()?;
                let mut policy = DualReputation::from_attributes(&social, &fighter)?;
                if let Some(threshold) = social_threshold {
                    policy = policy.with_social_threshold(*threshold);
                }
                Ok(policy.into())
            }
        }
    }
}

fn lookup_attribute<A: Attribute<N>, const N: usize>(name: &str) -> Result<A> {
    A::from_name(name).ok_or_else(|| {
        SolverError::Configuration(format!("unknown stat '{}' in fitness policy", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: [f64; 4]) -> StatVector<4> {
        StatVector::new(values)
    }

    /// social = {0, 1}, fighter = {2}
    fn dual() -> DualReputation<4> {
        DualReputation::new(vec![0, 1], vec![2]).unwrap()
    }

    #[test]
    fn test_dual_reputation_reference_points() {
        let policy = dual();
        assert_eq!(policy.fitness(&stats([60.0, 40.0, 0.0, 0.0])), 0.0);
        assert_eq!(policy.fitness(&stats([50.0, 30.0, 5.0, 0.0])), 25.0);
        assert_eq!(policy.fitness(&stats([100.0, 20.0, -10.0, 0.0])), 0.0);
    }

    #[test]
    fn test_dual_reputation_penalizes_fighter_only_above_zero() {
        let policy = dual();
        let calm = policy.fitness(&stats([100.0, 0.0, -50.0, 7.0]));
        let brawler = policy.fitness(&stats([100.0, 0.0, 3.0, 7.0]));
        assert_eq!(calm, 0.0);
        assert_eq!(brawler, 3.0);
    }

    #[test]
    fn test_dual_reputation_threshold_override() {
        let policy = dual().with_social_threshold(10.0);
        assert_eq!(policy.fitness(&stats([4.0, 4.0, 0.0, 0.0])), 2.0);
    }

    #[test]
    fn test_dual_reputation_rejects_overlap() {
        let err = DualReputation::<4>::new(vec![0, 1], vec![1]).unwrap_err();
        assert!(matches!(err, SolverError::Configuration(_)));
    }

    #[test]
    fn test_dual_reputation_rejects_out_of_range() {
        assert!(DualReputation::<4>::new(vec![4], vec![]).is_err());
    }

    #[test]
    fn test_target_deviation_rewards_overshoot() {
        let policy = TargetDeviation::<4>::from_index(2, 10.0).unwrap();
        assert_eq!(policy.fitness(&stats([0.0, 0.0, 4.0, 0.0])), 6.0);
        assert_eq!(policy.fitness(&stats([0.0, 0.0, 10.0, 0.0])), 0.0);
        assert_eq!(policy.fitness(&stats([0.0, 0.0, 13.0, 0.0])), -3.0);
    }

    #[test]
    fn test_target_deviation_index_checked() {
        assert!(TargetDeviation::<4>::from_index(4, 1.0).is_err());
    }

    #[test]
    fn test_fitness_spec_from_toml() {
        let content = "policy = \"target_deviation\"\nattribute = \"x\"\ntarget = 2.5\n";
        let spec: FitnessSpec = toml::from_str(content).unwrap();
        assert_eq!(
            spec,
            FitnessSpec::TargetDeviation {
                attribute: "x".into(),
                target: 2.5
            }
        );
    }
}
