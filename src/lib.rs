//! PM Solver - Upbringing Search for Fuzzy-Rule Characters
//!
//! A character's stats evolve by repeatedly taking the action a fuzzy rule
//! base rates highest. The solver searches the inclinations that bias those
//! ratings for the ones whose run ends with the best fitness.

pub mod actions;
pub mod core;
pub mod fitness;
pub mod harness;
pub mod optimizer;
pub mod oracle;
pub mod rules;
pub mod scenario;
pub mod simulation;
pub mod solver;

pub use crate::core::error::{Result, SolverError};
pub use crate::core::types::{ActionId, Attribute, InclinationVector, StatVector};
pub use harness::EvaluationHarness;
pub use solver::{run, Solution};
