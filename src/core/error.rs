use thiserror::Error;

use crate::rules::RuleBaseError;

#[derive(Error, Debug)]
pub enum SolverError {
    /// Fatal setup failure: engine not ready, unknown input slot, bad config
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The oracle produced an action the catalog does not know
    #[error("Unknown action: {0}")]
    Lookup(String),

    #[error("Duplicate action in catalog: {0}")]
    DuplicateAction(String),

    #[error("Invalid inclinations: {0}")]
    InvalidInclinations(String),

    #[error("Rule base error: {0}")]
    RuleBase(#[from] RuleBaseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
