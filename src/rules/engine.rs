//! Mamdani fuzzy inference engine
//!
//! The engine keeps its inputs, rule activations and outputs as plain
//! owned state. `Clone` therefore yields a copy that shares nothing mutable
//! with its source, which is what lets the harness hand one clone to each
//! concurrent run.

use crate::rules::norms::{Hedge, SNorm, TNorm};
use crate::rules::terms::Term;

/// Centroid sampling points used when a rule base does not set one
pub const DEFAULT_RESOLUTION: usize = 100;

#[derive(Debug, Clone)]
pub struct InputVariable {
    pub name: String,
    pub range: (f64, f64),
    pub terms: Vec<Term>,
    value: f64,
}

impl InputVariable {
    pub fn new(name: impl Into<String>, range: (f64, f64), terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            range,
            terms,
            value: f64::NAN,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }
}

/// One fired consequent waiting to be aggregated
#[derive(Debug, Clone, Copy)]
struct Activation {
    term: usize,
    degree: f64,
    implication: TNorm,
}

#[derive(Debug, Clone)]
pub struct OutputVariable {
    pub name: String,
    pub range: (f64, f64),
    pub terms: Vec<Term>,
    /// Value reported when no rule fires; NaN unless the rule base sets one
    pub default_value: f64,
    pub lock_range: bool,
    pub aggregation: SNorm,
    pub resolution: usize,
    activated: Vec<Activation>,
    value: f64,
}

impl OutputVariable {
    pub fn new(name: impl Into<String>, range: (f64, f64), terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            range,
            terms,
            default_value: f64::NAN,
            lock_range: false,
            aggregation: SNorm::Maximum,
            resolution: DEFAULT_RESOLUTION,
            activated: Vec::new(),
            value: f64::NAN,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    fn aggregate_at(&self, x: f64) -> f64 {
        self.activated.iter().fold(0.0, |acc, a| {
            let implied = a.implication.apply(a.degree, self.terms[a.term].membership(x));
            self.aggregation.apply(acc, implied)
        })
    }

    /// Centroid of the aggregated fuzzy set, sampled at bin midpoints
    fn centroid(&self) -> f64 {
        if self.activated.is_empty() || self.resolution == 0 {
            return f64::NAN;
        }
        let (min, max) = self.range;
        let dx = (max - min) / self.resolution as f64;
        let mut area = 0.0;
        let mut moment = 0.0;
        for i in 0..self.resolution {
            let x = min + (i as f64 + 0.5) * dx;
            let y = self.aggregate_at(x);
            area += y;
            moment += y * x;
        }
        if area > 0.0 {
            moment / area
        } else {
            f64::NAN
        }
    }

    fn defuzzify(&mut self) {
        let mut value = self.centroid();
        if value.is_nan() {
            value = self.default_value;
        }
        if self.lock_range && !value.is_nan() {
            value = value.clamp(self.range.0, self.range.1);
        }
        self.value = value;
    }

    fn clear(&mut self) {
        self.activated.clear();
        self.value = f64::NAN;
    }
}

/// Rule premise with variables and terms resolved to slots
#[derive(Debug, Clone)]
pub(crate) enum Expression {
    Proposition {
        input: usize,
        term: usize,
        hedges: Vec<Hedge>,
    },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    fn evaluate(&self, inputs: &[InputVariable], conjunction: TNorm, disjunction: SNorm) -> f64 {
        match self {
            Expression::Proposition { input, term, hedges } => {
                let variable = &inputs[*input];
                let degree = variable.terms[*term].membership(variable.value);
                // Hedges are written outermost first: "not very x" is not(very(x))
                hedges.iter().rev().fold(degree, |d, h| h.apply(d))
            }
            Expression::And(a, b) => conjunction.apply(
                a.evaluate(inputs, conjunction, disjunction),
                b.evaluate(inputs, conjunction, disjunction),
            ),
            Expression::Or(a, b) => disjunction.apply(
                a.evaluate(inputs, conjunction, disjunction),
                b.evaluate(inputs, conjunction, disjunction),
            ),
        }
    }

    fn uses_and(&self) -> bool {
        match self {
            Expression::Proposition { .. } => false,
            Expression::And(..) => true,
            Expression::Or(a, b) => a.uses_and() || b.uses_and(),
        }
    }

    fn uses_or(&self) -> bool {
        match self {
            Expression::Proposition { .. } => false,
            Expression::Or(..) => true,
            Expression::And(a, b) => a.uses_or() || b.uses_or(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub text: String,
    pub weight: f64,
    pub(crate) antecedent: Expression,
    /// `(output slot, term slot)` pairs
    pub(crate) consequents: Vec<(usize, usize)>,
    activation_degree: f64,
}

impl Rule {
    pub(crate) fn new(
        text: String,
        weight: f64,
        antecedent: Expression,
        consequents: Vec<(usize, usize)>,
    ) -> Self {
        Self {
            text,
            weight,
            antecedent,
            consequents,
            activation_degree: 0.0,
        }
    }

    /// Firing strength from the last `process`
    pub fn activation_degree(&self) -> f64 {
        self.activation_degree
    }
}

#[derive(Debug, Clone)]
pub struct RuleBlock {
    pub name: String,
    pub enabled: bool,
    pub conjunction: Option<TNorm>,
    pub disjunction: Option<SNorm>,
    pub implication: TNorm,
    pub rules: Vec<Rule>,
}

impl RuleBlock {
    fn activate(&mut self, inputs: &[InputVariable], outputs: &mut [OutputVariable]) {
        let conjunction = self.conjunction.unwrap_or(TNorm::Minimum);
        let disjunction = self.disjunction.unwrap_or(SNorm::Maximum);
        for rule in &mut self.rules {
            let degree = rule.weight * rule.antecedent.evaluate(inputs, conjunction, disjunction);
            rule.activation_degree = degree;
            if degree > 0.0 {
                for &(output, term) in &rule.consequents {
                    outputs[output].activated.push(Activation {
                        term,
                        degree,
                        implication: self.implication,
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub name: String,
    inputs: Vec<InputVariable>,
    outputs: Vec<OutputVariable>,
    blocks: Vec<RuleBlock>,
}

impl Engine {
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<InputVariable>,
        outputs: Vec<OutputVariable>,
        blocks: Vec<RuleBlock>,
    ) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
            blocks,
        }
    }

    /// Check the engine can be processed, collecting every problem found
    pub fn readiness(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.inputs.is_empty() {
            errors.push("Engine has no input variables".to_string());
        }
        if self.outputs.is_empty() {
            errors.push("Engine has no output variables".to_string());
        }
        if self.blocks.is_empty() {
            errors.push("Engine has no rule blocks".to_string());
        }

        for input in &self.inputs {
            if !(input.range.0 < input.range.1) {
                errors.push(format!("Input '{}' has an empty range", input.name));
            }
            if input.terms.is_empty() {
                errors.push(format!("Input '{}' has no terms", input.name));
            }
        }

        for output in &self.outputs {
            if !(output.range.0 < output.range.1) {
                errors.push(format!("Output '{}' has an empty range", output.name));
            }
            if output.terms.is_empty() {
                errors.push(format!("Output '{}' has no terms", output.name));
            }
            if output.resolution == 0 {
                errors.push(format!("Output '{}' has zero resolution", output.name));
            }
        }

        for block in &self.blocks {
            if block.rules.is_empty() {
                errors.push(format!("Rule block '{}' has no rules", block.name));
            }
            let uses_and = block.rules.iter().any(|r| r.antecedent.uses_and());
            let uses_or = block.rules.iter().any(|r| r.antecedent.uses_or());
            if uses_and && block.conjunction.is_none() {
                errors.push(format!(
                    "Rule block '{}' uses 'and' but has no conjunction operator",
                    block.name
                ));
            }
            if uses_or && block.disjunction.is_none() {
                errors.push(format!(
                    "Rule block '{}' uses 'or' but has no disjunction operator",
                    block.name
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Fire every enabled rule block and defuzzify every output
    pub fn process(&mut self) {
        for output in &mut self.outputs {
            output.activated.clear();
        }
        for block in self.blocks.iter_mut().filter(|b| b.enabled) {
            block.activate(&self.inputs, &mut self.outputs);
        }
        for output in &mut self.outputs {
            output.defuzzify();
        }
    }

    /// Drop rule activations and output values; input values are kept
    pub fn restart(&mut self) {
        for output in &mut self.outputs {
            output.clear();
        }
        for rule in self.blocks.iter_mut().flat_map(|b| b.rules.iter_mut()) {
            rule.activation_degree = 0.0;
        }
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|v| v.name == name)
    }

    pub fn set_input_value(&mut self, index: usize, value: f64) {
        self.inputs[index].value = value;
    }

    pub fn input_value(&self, index: usize) -> f64 {
        self.inputs[index].value
    }

    pub fn output_value(&self, index: usize) -> f64 {
        self.outputs[index].value
    }

    pub fn inputs(&self) -> &[InputVariable] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputVariable] {
        &self.outputs
    }

    pub fn rule_blocks(&self) -> &[RuleBlock] {
        &self.blocks
    }

    /// Output names in declaration order
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|v| v.name.as_str())
    }
}
