//! Schwefel benchmark
//!
//! `f(x) = 418.9828872724338 d - sum x_i sin(sqrt(|x_i|))` on `[-500, 500]^d`.
//! The global minimum is close to zero at `x_i = 420.968746`. Many deep local
//! minima sit far from it, which makes it a good check of the archipelago.

use crate::core::error::Result;
use crate::optimizer::{Bounds, Problem};

const OFFSET: f64 = 418.982_887_272_433_8;
pub const OPTIMUM_COMPONENT: f64 = 420.968_746;

#[derive(Debug, Clone, Copy)]
pub struct Schwefel {
    dimension: usize,
}

impl Schwefel {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn optimum(&self) -> Vec<f64> {
        vec![OPTIMUM_COMPONENT; self.dimension]
    }
}

impl Problem for Schwefel {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn bounds(&self) -> Bounds {
        Bounds::uniform(self.dimension, -500.0, 500.0)
    }

    fn fitness(&self, x: &[f64]) -> Result<f64> {
        let sum: f64 = x.iter().map(|v| v * v.abs().sqrt().sin()).sum();
        Ok(OFFSET * x.len() as f64 - sum)
    }

    fn name(&self) -> String {
        format!("schwefel-{}", self.dimension)
    }
}
