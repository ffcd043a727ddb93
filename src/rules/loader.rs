//! Load fuzzy rule bases from TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::rules::engine::{
    Engine, Expression, InputVariable, OutputVariable, Rule, RuleBlock, DEFAULT_RESOLUTION,
};
use crate::rules::norms::{SNorm, TNorm};
use crate::rules::parser::{parse_rule, Antecedent};
use crate::rules::terms::Term;

/// Errors that can occur when loading a rule base
#[derive(Debug, Error)]
pub enum RuleBaseError {
    /// TOML parsing failed
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Rule text does not follow the rule grammar
    #[error("Cannot parse rule '{rule}': {message}")]
    Syntax { rule: String, message: String },
    /// Rule names a variable the rule base does not declare
    #[error("Rule '{rule}' references unknown variable '{variable}'")]
    UnknownVariable { rule: String, variable: String },
    /// Rule names a term its variable does not declare
    #[error("Rule '{rule}' references unknown term '{term}' of '{variable}'")]
    UnknownTerm {
        rule: String,
        variable: String,
        term: String,
    },
    #[error("Variable '{0}' is declared more than once")]
    DuplicateVariable(String),
}

/// Declarative description of an engine, as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBaseSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
    #[serde(default)]
    pub rule_blocks: Vec<RuleBlockSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub range: [f64; 2],
    #[serde(default)]
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    pub name: String,
    pub range: [f64; 2],
    #[serde(default)]
    pub terms: Vec<Term>,
    /// Value when no rule fires; omitted means NaN
    #[serde(default)]
    pub default: Option<f64>,
    #[serde(default)]
    pub lock_range: bool,
    #[serde(default = "default_aggregation")]
    pub aggregation: SNorm,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBlockSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub conjunction: Option<TNorm>,
    #[serde(default)]
    pub disjunction: Option<SNorm>,
    #[serde(default = "default_implication")]
    pub implication: TNorm,
    #[serde(default)]
    pub rules: Vec<String>,
}

fn default_aggregation() -> SNorm {
    SNorm::Maximum
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_enabled() -> bool {
    true
}

fn default_implication() -> TNorm {
    TNorm::Minimum
}

/// Parse a rule base from TOML text and build its engine
pub fn parse_rule_base(content: &str) -> Result<Engine, RuleBaseError> {
    let spec: RuleBaseSpec = toml::from_str(content)?;
    build_engine(&spec)
}

/// Load a rule base from a TOML file on disk
pub fn load_rule_base(path: &Path) -> Result<Engine, RuleBaseError> {
    let content = fs::read_to_string(path)?;
    parse_rule_base(&content)
}

/// Compile a rule-base description into an engine, resolving every name in every rule
///
/// The result is not checked for readiness; callers decide when to ask.
pub fn build_engine(spec: &RuleBaseSpec) -> Result<Engine, RuleBaseError> {
    let mut seen = std::collections::HashSet::new();
    for name in spec
        .inputs
        .iter()
        .map(|v| &v.name)
        .chain(spec.outputs.iter().map(|v| &v.name))
    {
        if !seen.insert(name.as_str()) {
            return Err(RuleBaseError::DuplicateVariable(name.clone()));
        }
    }

    let inputs: Vec<InputVariable> = spec
        .inputs
        .iter()
        .map(|v| InputVariable::new(v.name.clone(), (v.range[0], v.range[1]), v.terms.clone()))
        .collect();

    let outputs: Vec<OutputVariable> = spec
        .outputs
        .iter()
        .map(|v| {
            let mut output =
                OutputVariable::new(v.name.clone(), (v.range[0], v.range[1]), v.terms.clone());
            output.default_value = v.default.unwrap_or(f64::NAN);
            output.lock_range = v.lock_range;
            output.aggregation = v.aggregation;
            output.resolution = v.resolution;
            output
        })
        .collect();

    let mut blocks = Vec::with_capacity(spec.rule_blocks.len());
    for block in &spec.rule_blocks {
        let mut rules = Vec::with_capacity(block.rules.len());
        for text in &block.rules {
            rules.push(compile_rule(text, &inputs, &outputs)?);
        }
        blocks.push(RuleBlock {
            name: block.name.clone(),
            enabled: block.enabled,
            conjunction: block.conjunction,
            disjunction: block.disjunction,
            implication: block.implication,
            rules,
        });
    }

    Ok(Engine::new(spec.name.clone(), inputs, outputs, blocks))
}

fn compile_rule(
    text: &str,
    inputs: &[InputVariable],
    outputs: &[OutputVariable],
) -> Result<Rule, RuleBaseError> {
    let syntax = parse_rule(text).map_err(|message| RuleBaseError::Syntax {
        rule: text.to_string(),
        message,
    })?;

    let antecedent = compile_antecedent(text, &syntax.antecedent, inputs)?;

    let mut consequents = Vec::with_capacity(syntax.consequents.len());
    for c in &syntax.consequents {
        let output = outputs
            .iter()
            .position(|v| v.name == c.variable)
            .ok_or_else(|| RuleBaseError::UnknownVariable {
                rule: text.to_string(),
                variable: c.variable.clone(),
            })?;
        let term = outputs[output]
            .term_index(&c.term)
            .ok_or_else(|| RuleBaseError::UnknownTerm {
                rule: text.to_string(),
                variable: c.variable.clone(),
                term: c.term.clone(),
            })?;
        consequents.push((output, term));
    }

    Ok(Rule::new(text.to_string(), syntax.weight, antecedent, consequents))
}

fn compile_antecedent(
    text: &str,
    antecedent: &Antecedent,
    inputs: &[InputVariable],
) -> Result<Expression, RuleBaseError> {
    match antecedent {
        Antecedent::Proposition {
            variable,
            hedges,
            term,
        } => {
            let input = inputs
                .iter()
                .position(|v| &v.name == variable)
                .ok_or_else(|| RuleBaseError::UnknownVariable {
                    rule: text.to_string(),
                    variable: variable.clone(),
                })?;
            let term_index =
                inputs[input]
                    .term_index(term)
                    .ok_or_else(|| RuleBaseError::UnknownTerm {
                        rule: text.to_string(),
                        variable: variable.clone(),
                        term: term.clone(),
                    })?;
            Ok(Expression::Proposition {
                input,
                term: term_index,
                hedges: hedges.clone(),
            })
        }
        Antecedent::And(a, b) => Ok(Expression::And(
            Box::new(compile_antecedent(text, a, inputs)?),
            Box::new(compile_antecedent(text, b, inputs)?),
        )),
        Antecedent::Or(a, b) => Ok(Expression::Or(
            Box::new(compile_antecedent(text, a, inputs)?),
            Box::new(compile_antecedent(text, b, inputs)?),
        )),
    }
}
