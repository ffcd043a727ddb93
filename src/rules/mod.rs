//! Fuzzy rule bases loaded from TOML

pub mod engine;
pub mod norms;
pub mod parser;
pub mod terms;
mod loader;

pub use engine::{Engine, InputVariable, OutputVariable, Rule, RuleBlock};
pub use loader::{
    build_engine, load_rule_base, parse_rule_base, InputSpec, OutputSpec, RuleBaseError,
    RuleBaseSpec, RuleBlockSpec,
};
pub use norms::{Hedge, SNorm, TNorm};
pub use terms::{Shape, Term};
