//! Decision oracle backed by the fuzzy rule engine

use std::path::Path;
use std::sync::Arc;

use crate::core::error::{Result, SolverError};
use crate::core::types::{ActionId, Attribute, InclinationVector, StatVector};
use crate::oracle::{ActionPriorities, ActionPriority, DecisionOracle};
use crate::rules::{load_rule_base, parse_rule_base, Engine};

/// Adapter between typed stat/inclination vectors and engine input slots
///
/// Each rule-base output is one action; its name is the action id.
#[derive(Debug, Clone)]
pub struct FuzzyOracle<const N: usize, const M: usize> {
    engine: Engine,
    stat_slots: [usize; N],
    inclination_slots: [usize; M],
    actions: Arc<[ActionId]>,
}

impl<const N: usize, const M: usize> FuzzyOracle<N, M> {
    /// Wrap a loaded engine
    ///
    /// Fails with a configuration error if the engine is not ready or lacks
    /// an input named after any stat `S` or inclination `I`.
    pub fn new<S: Attribute<N>, I: Attribute<M>>(engine: Engine) -> Result<Self> {
        if let Err(diagnostics) = engine.readiness() {
            return Err(SolverError::Configuration(format!(
                "engine '{}' is not ready:\n{}",
                engine.name,
                diagnostics.join("\n")
            )));
        }

        let stat_slots = resolve_slots(&engine, S::names(), "stat")?;
        let inclination_slots = resolve_slots(&engine, I::names(), "inclination")?;
        let actions: Arc<[ActionId]> = engine.output_names().map(ActionId::new).collect();

        tracing::debug!(
            "Loaded engine '{}' with {} inputs and {} actions",
            engine.name,
            engine.inputs().len(),
            actions.len()
        );

        Ok(Self {
            engine,
            stat_slots,
            inclination_slots,
            actions,
        })
    }

    /// Parse a TOML rule base and wrap it
    pub fn from_rule_base<S: Attribute<N>, I: Attribute<M>>(content: &str) -> Result<Self> {
        let engine = parse_rule_base(content)?;
        Self::new::<S, I>(engine)
    }

    /// Load a TOML rule base from disk and wrap it
    pub fn load<S: Attribute<N>, I: Attribute<M>>(path: &Path) -> Result<Self> {
        let engine = load_rule_base(path)?;
        Self::new::<S, I>(engine)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

fn resolve_slots<const K: usize>(
    engine: &Engine,
    names: [&'static str; K],
    kind: &str,
) -> Result<[usize; K]> {
    let mut slots = [0usize; K];
    for (slot, name) in slots.iter_mut().zip(names) {
        *slot = engine.input_index(name).ok_or_else(|| {
            SolverError::Configuration(format!(
                "rule base '{}' has no input for {} '{}'",
                engine.name, kind, name
            ))
        })?;
    }
    Ok(slots)
}

impl<const N: usize, const M: usize> DecisionOracle<N, M> for FuzzyOracle<N, M> {
    fn configure(&mut self, inclinations: &InclinationVector<M>) {
        for (&slot, value) in self.inclination_slots.iter().zip(inclinations.iter()) {
            self.engine.set_input_value(slot, value);
        }
    }

    fn restart(&mut self) {
        self.engine.restart();
    }

    fn score(&mut self, stats: &StatVector<N>) -> ActionPriorities {
        for (&slot, value) in self.stat_slots.iter().zip(stats.iter()) {
            self.engine.set_input_value(slot, value);
        }

        self.engine.process();

        let entries = self
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let priority = self.engine.output_value(i);
                tracing::trace!("Action {} priority: {}", action, priority);
                ActionPriority {
                    action: action.clone(),
                    priority,
                }
            })
            .collect();

        ActionPriorities::new(entries)
    }

    fn actions(&self) -> &[ActionId] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stat {
        Energy,
    }

    impl Attribute<1> for Stat {
        const ALL: [Self; 1] = [Stat::Energy];
        fn index(self) -> usize {
            0
        }
        fn name(self) -> &'static str {
            "energy"
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Bias {
        Drive,
    }

    impl Attribute<1> for Bias {
        const ALL: [Self; 1] = [Bias::Drive];
        fn index(self) -> usize {
            0
        }
        fn name(self) -> &'static str {
            "drive"
        }
    }

    const RULES: &str = r#"
name = "tiny"

[[inputs]]
name = "energy"
range = [0.0, 10.0]
terms = [
    { name = "low", shape = "ramp", start = 10.0, end = 0.0 },
    { name = "high", shape = "ramp", start = 0.0, end = 10.0 },
]

[[inputs]]
name = "drive"
range = [0.0, 1.0]
terms = [
    { name = "low", shape = "ramp", start = 1.0, end = 0.0 },
    { name = "high", shape = "ramp", start = 0.0, end = 1.0 },
]

[[outputs]]
name = "Work"
range = [0.0, 1.0]
terms = [
    { name = "low", shape = "ramp", start = 1.0, end = 0.0 },
    { name = "high", shape = "ramp", start = 0.0, end = 1.0 },
]

[[outputs]]
name = "Sleep"
range = [0.0, 1.0]
terms = [
    { name = "low", shape = "ramp", start = 1.0, end = 0.0 },
    { name = "high", shape = "ramp", start = 0.0, end = 1.0 },
]

[[rule_blocks]]
conjunction = "minimum"
rules = [
    "if drive is high and energy is high then Work is high",
    "if energy is low then Sleep is high",
]
"#;

    fn oracle() -> FuzzyOracle<1, 1> {
        FuzzyOracle::from_rule_base::<Stat, Bias>(RULES).unwrap()
    }

    #[test]
    fn test_actions_follow_output_order() {
        let oracle = oracle();
        let names: Vec<&str> = oracle.actions().iter().map(|a| a.as_str()).collect();
        assert_eq!(names, vec!["Work", "Sleep"]);
    }

    #[test]
    fn test_score_reflects_stats_and_inclinations() {
        let mut oracle = oracle();
        oracle.configure(&InclinationVector::new([1.0]).unwrap());
        oracle.restart();

        let rested = oracle.score(&StatVector::new([10.0]));
        assert!(rested.get("Work").unwrap() > 0.5);
        // Sleep does not fire at all: NaN is the engine's "no opinion"
        assert!(rested.get("Sleep").unwrap().is_nan());

        let tired = oracle.score(&StatVector::new([0.0]));
        assert!(tired.get("Sleep").unwrap() > 0.5);
    }

    #[test]
    fn test_missing_input_is_configuration_error() {
        let content = RULES.replace("name = \"drive\"", "name = \"motivation\"");
        let content = content.replace("if drive is", "if motivation is");
        let err = FuzzyOracle::<1, 1>::from_rule_base::<Stat, Bias>(&content).unwrap_err();
        assert!(matches!(err, SolverError::Configuration(msg) if msg.contains("drive")));
    }

    #[test]
    fn test_unready_engine_is_configuration_error() {
        let content = RULES.replace("conjunction = \"minimum\"\n", "");
        let err = FuzzyOracle::<1, 1>::from_rule_base::<Stat, Bias>(&content).unwrap_err();
        assert!(matches!(err, SolverError::Configuration(msg) if msg.contains("not ready")));
    }

    #[test]
    fn test_clone_does_not_disturb_source() {
        let mut template = oracle();
        template.configure(&InclinationVector::new([0.0]).unwrap());

        let mut clone = template.clone();
        clone.configure(&InclinationVector::new([1.0]).unwrap());
        clone.restart();
        clone.score(&StatVector::new([7.0]));

        let mut a = template.clone();
        let mut b = template.clone();
        a.restart();
        b.restart();
        assert_eq!(
            format!("{:?}", a.score(&StatVector::new([5.0]))),
            format!("{:?}", b.score(&StatVector::new([5.0])))
        );
        assert_eq!(template.engine().input_value(1), 0.0);
    }
}
