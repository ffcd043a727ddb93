pub mod config;
pub mod error;
pub mod types;

pub use config::{OptimizerConfig, SolverConfig};
pub use error::{Result, SolverError};
pub use types::{ActionId, Attribute, InclinationVector, StatVector};
