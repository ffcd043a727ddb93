//! Fuzzy operators: t-norms, s-norms and hedges

use serde::{Deserialize, Serialize};

/// Conjunction and implication operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TNorm {
    Minimum,
    AlgebraicProduct,
}

impl TNorm {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            TNorm::Minimum => a.min(b),
            TNorm::AlgebraicProduct => a * b,
        }
    }
}

/// Disjunction and aggregation operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SNorm {
    Maximum,
    AlgebraicSum,
}

impl SNorm {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            SNorm::Maximum => a.max(b),
            SNorm::AlgebraicSum => a + b - a * b,
        }
    }
}

/// Linguistic modifier applied to a membership degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hedge {
    Not,
    Very,
    Somewhat,
}

impl Hedge {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "not" => Some(Hedge::Not),
            "very" => Some(Hedge::Very),
            "somewhat" => Some(Hedge::Somewhat),
            _ => None,
        }
    }

    pub fn apply(self, degree: f64) -> f64 {
        match self {
            Hedge::Not => 1.0 - degree,
            Hedge::Very => degree * degree,
            Hedge::Somewhat => degree.sqrt(),
        }
    }
}
