//! Action selection from oracle priorities
//!
//! Identical priorities always yield the identical choice:
//! 1. NaN priorities count as 0
//! 2. The strictly greatest priority wins
//! 3. Ties go to the action declared first
//! 4. If nothing beats the floor, the first declared action is taken

use crate::core::types::ActionId;
use crate::oracle::ActionPriorities;

/// Starting bar for the scan; valid priorities sit well above it
pub const PRIORITY_FLOOR: f64 = -1_000_000.0;

/// Pick the action to take this step
///
/// Returns `None` only when there are no declared actions at all.
pub fn select_action(priorities: &ActionPriorities) -> Option<&ActionId> {
    let fallback = priorities.first().map(|e| &e.action)?;

    let mut best = PRIORITY_FLOOR;
    let mut chosen = fallback;

    for entry in priorities.iter() {
        let priority = if entry.priority.is_nan() {
            0.0
        } else {
            entry.priority
        };
        if priority > best {
            best = priority;
            chosen = &entry.action;
        }
    }

    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(pairs: &[(&str, f64)]) -> Option<String> {
        let priorities = ActionPriorities::from_pairs(pairs.iter().copied());
        select_action(&priorities).map(|a| a.to_string())
    }

    #[test]
    fn test_highest_priority_wins() {
        assert_eq!(pick(&[("A", 0.2), ("B", 0.7), ("C", 0.5)]).as_deref(), Some("B"));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        for _ in 0..10 {
            assert_eq!(pick(&[("A", 0.3), ("B", 0.9), ("C", 0.9)]).as_deref(), Some("B"));
        }
    }

    #[test]
    fn test_nan_counts_as_zero() {
        assert_eq!(pick(&[("A", -0.5), ("B", f64::NAN)]).as_deref(), Some("B"));
        assert_eq!(pick(&[("A", f64::NAN), ("B", 0.1)]).as_deref(), Some("B"));
    }

    #[test]
    fn test_all_nan_falls_back_to_first() {
        assert_eq!(
            pick(&[("A", f64::NAN), ("B", f64::NAN), ("C", f64::NAN)]).as_deref(),
            Some("A")
        );
    }

    #[test]
    fn test_below_floor_falls_back_to_first() {
        assert_eq!(pick(&[("A", -2e6), ("B", -5e6)]).as_deref(), Some("A"));
    }

    #[test]
    fn test_empty_has_no_choice() {
        assert_eq!(pick(&[]), None);
    }
}
