//! Core value types shared by the catalog, the oracle and the simulation

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::ops::{Add, Index};
use std::sync::Arc;

use crate::core::error::{Result, SolverError};

/// Identifier of a catalog action and of the oracle output that scores it
///
/// Cloning is a reference-count bump, so traces can hold one per step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(Arc<str>);

impl ActionId {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ActionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Serialize for ActionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A named slot of a fixed-size vector
///
/// Scenarios implement this on a plain enum so wiring stats and inclinations
/// to engine inputs goes through names instead of bare positions.
pub trait Attribute<const N: usize>: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every slot, in vector order
    const ALL: [Self; N];

    fn index(self) -> usize;

    /// Name of the matching rule-base input variable
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name().eq_ignore_ascii_case(name))
    }

    fn names() -> [&'static str; N] {
        Self::ALL.map(Self::name)
    }
}

/// Character attributes, unbounded and evolved only by addition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatVector<const N: usize>([f64; N]);

impl<const N: usize> StatVector<N> {
    pub fn zero() -> Self {
        Self([0.0; N])
    }

    pub fn new(values: [f64; N]) -> Self {
        Self(values)
    }

    /// Build a sparse vector from `(attribute, value)` pairs, the rest zero
    pub fn from_pairs<A: Attribute<N>>(pairs: &[(A, f64)]) -> Self {
        let mut values = [0.0; N];
        for &(attr, value) in pairs {
            values[attr.index()] += value;
        }
        Self(values)
    }

    pub fn get<A: Attribute<N>>(&self, attr: A) -> f64 {
        self.0[attr.index()]
    }

    pub fn as_array(&self) -> &[f64; N] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Sum of the components at `indices`
    pub fn sum_of(&self, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| self.0[i]).sum()
    }

    /// Pair each component with its attribute name, for reports
    pub fn named<A: Attribute<N>>(&self) -> Vec<(&'static str, f64)> {
        A::ALL.iter().map(|a| (a.name(), self.0[a.index()])).collect()
    }
}

impl<const N: usize> Default for StatVector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Add for StatVector<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        Self(out)
    }
}

impl<const N: usize> Add<&StatVector<N>> for &StatVector<N> {
    type Output = StatVector<N>;
    fn add(self, rhs: &StatVector<N>) -> StatVector<N> {
        *self + *rhs
    }
}

impl<const N: usize> Index<usize> for StatVector<N> {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> Serialize for StatVector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Per-run bias parameters, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclinationVector<const M: usize>([f64; M]);

impl<const M: usize> InclinationVector<M> {
    /// Build from an array, rejecting components outside [0, 1] or NaN
    pub fn new(values: [f64; M]) -> Result<Self> {
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(SolverError::InvalidInclinations(format!(
                "component {} is {}, expected a value in [0, 1]",
                i, v
            )));
        }
        Ok(Self(values))
    }

    /// Build from an optimizer candidate
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let array: [f64; M] = values.try_into().map_err(|_| {
            SolverError::InvalidInclinations(format!(
                "expected {} components, got {}",
                M,
                values.len()
            ))
        })?;
        Self::new(array)
    }

    pub fn get<A: Attribute<M>>(&self, attr: A) -> f64 {
        self.0[attr.index()]
    }

    pub fn as_array(&self) -> &[f64; M] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl<const M: usize> Index<usize> for InclinationVector<M> {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const M: usize> Serialize for InclinationVector<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Probe {
        Left,
        Right,
    }

    impl Attribute<2> for Probe {
        const ALL: [Self; 2] = [Probe::Left, Probe::Right];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                Probe::Left => "left",
                Probe::Right => "right",
            }
        }
    }

    #[test]
    fn test_zero_vector() {
        let v = StatVector::<4>::zero();
        assert!(v.iter().all(|x| x == 0.0));
    }

    #[test]
    fn test_add_is_elementwise() {
        let a = StatVector::new([1.0, 2.0, 3.0, 4.0]);
        let b = StatVector::new([0.5, -2.0, 0.0, 10.0]);
        assert_eq!((a + b).as_array(), &[1.5, 0.0, 3.0, 14.0]);
    }

    #[test]
    fn test_add_does_not_clamp() {
        let a = StatVector::new([-500.0]);
        let b = StatVector::new([-500.0]);
        assert_eq!((a + b)[0], -1000.0);
    }

    #[test]
    fn test_from_pairs_and_named_access() {
        let v = StatVector::<2>::from_pairs(&[(Probe::Right, 2.5)]);
        assert_eq!(v.get(Probe::Left), 0.0);
        assert_eq!(v.get(Probe::Right), 2.5);
        assert_eq!(v.named::<Probe>(), vec![("left", 0.0), ("right", 2.5)]);
    }

    #[test]
    fn test_attribute_from_name_ignores_case() {
        assert_eq!(Probe::from_name("RIGHT"), Some(Probe::Right));
        assert_eq!(Probe::from_name("middle"), None);
        assert_eq!(Probe::names(), ["left", "right"]);
    }

    #[test]
    fn test_inclinations_reject_out_of_range() {
        assert!(InclinationVector::new([0.0, 1.0]).is_ok());
        assert!(InclinationVector::new([1.01, 0.5]).is_err());
        assert!(InclinationVector::new([f64::NAN, 0.5]).is_err());
    }

    #[test]
    fn test_inclinations_from_slice_checks_length() {
        assert!(InclinationVector::<2>::from_slice(&[0.2, 0.3]).is_ok());
        let err = InclinationVector::<2>::from_slice(&[0.2]).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInclinations(_)));
    }

    #[test]
    fn test_action_id_borrows_as_str() {
        let id = ActionId::new("Hunting");
        let mut map = std::collections::HashMap::new();
        map.insert(id.clone(), 1);
        assert_eq!(map.get("Hunting"), Some(&1));
        assert_eq!(id.to_string(), "Hunting");
    }

    fn small_vec() -> impl Strategy<Value = StatVector<4>> {
        prop::array::uniform4(-1000i32..1000).prop_map(|a| StatVector::new(a.map(f64::from)))
    }

    proptest! {
        #[test]
        fn prop_addition_is_commutative(a in small_vec(), b in small_vec()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn prop_addition_is_associative(a in small_vec(), b in small_vec(), c in small_vec()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }
    }
}
