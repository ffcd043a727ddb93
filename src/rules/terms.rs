//! Linguistic terms and their membership functions

use serde::{Deserialize, Serialize};

/// Membership function shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Triangle { a: f64, b: f64, c: f64 },
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// Rising when `start < end`, falling otherwise
    Ramp { start: f64, end: f64 },
    Rectangle { start: f64, end: f64 },
    Gaussian { mean: f64, sd: f64 },
}

/// A named fuzzy set over a variable's range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Term {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Degree of membership of `x`, in [0, 1]; NaN in, NaN out
    pub fn membership(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        match self.shape {
            Shape::Triangle { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            Shape::Trapezoid { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    if a == b {
                        1.0
                    } else {
                        (x - a) / (b - a)
                    }
                } else if x <= c {
                    1.0
                } else if x < d {
                    (d - x) / (d - c)
                } else {
                    0.0
                }
            }
            Shape::Ramp { start, end } => {
                if start == end {
                    0.0
                } else if start < end {
                    if x <= start {
                        0.0
                    } else if x >= end {
                        1.0
                    } else {
                        (x - start) / (end - start)
                    }
                } else if x >= start {
                    0.0
                } else if x <= end {
                    1.0
                } else {
                    (start - x) / (start - end)
                }
            }
            Shape::Rectangle { start, end } => {
                if x >= start && x <= end {
                    1.0
                } else {
                    0.0
                }
            }
            Shape::Gaussian { mean, sd } => {
                if sd == 0.0 {
                    if x == mean {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    (-(x - mean).powi(2) / (2.0 * sd * sd)).exp()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_triangle_membership() {
        let t = Term::new("mid", Shape::Triangle { a: 0.0, b: 0.5, c: 1.0 });
        assert_eq!(t.membership(-0.1), 0.0);
        assert!((t.membership(0.25) - 0.5).abs() < EPS);
        assert_eq!(t.membership(0.5), 1.0);
        assert!((t.membership(0.75) - 0.5).abs() < EPS);
        assert_eq!(t.membership(1.1), 0.0);
    }

    #[test]
    fn test_degenerate_triangle_peak() {
        let t = Term::new("zero", Shape::Triangle { a: 0.0, b: 0.0, c: 0.5 });
        assert_eq!(t.membership(0.0), 1.0);
        assert!((t.membership(0.25) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_trapezoid_plateau() {
        let t = Term::new("band", Shape::Trapezoid { a: 0.0, b: 1.0, c: 2.0, d: 4.0 });
        assert!((t.membership(0.5) - 0.5).abs() < EPS);
        assert_eq!(t.membership(1.5), 1.0);
        assert!((t.membership(3.0) - 0.5).abs() < EPS);
        assert_eq!(t.membership(5.0), 0.0);
    }

    #[test]
    fn test_ramps_saturate_outside_range() {
        let rising = Term::new("high", Shape::Ramp { start: 0.0, end: 10.0 });
        assert_eq!(rising.membership(-3.0), 0.0);
        assert!((rising.membership(2.5) - 0.25).abs() < EPS);
        assert_eq!(rising.membership(250.0), 1.0);

        let falling = Term::new("low", Shape::Ramp { start: 10.0, end: 0.0 });
        assert_eq!(falling.membership(-3.0), 1.0);
        assert!((falling.membership(2.5) - 0.75).abs() < EPS);
        assert_eq!(falling.membership(250.0), 0.0);
    }

    #[test]
    fn test_rectangle_and_gaussian() {
        let r = Term::new("on", Shape::Rectangle { start: 1.0, end: 2.0 });
        assert_eq!(r.membership(1.5), 1.0);
        assert_eq!(r.membership(2.5), 0.0);

        let g = Term::new("near", Shape::Gaussian { mean: 0.0, sd: 1.0 });
        assert_eq!(g.membership(0.0), 1.0);
        assert!(g.membership(3.0) < 0.02);
    }

    #[test]
    fn test_nan_input_is_nan() {
        let t = Term::new("any", Shape::Rectangle { start: 0.0, end: 1.0 });
        assert!(t.membership(f64::NAN).is_nan());
    }

    #[test]
    fn test_term_deserializes_from_toml() {
        let content = "name = \"high\"\nshape = \"ramp\"\nstart = 0.5\nend = 1.0\n";
        let t: Term = toml::from_str(content).unwrap();
        assert_eq!(t.name, "high");
        assert_eq!(t.shape, Shape::Ramp { start: 0.5, end: 1.0 });
    }
}
