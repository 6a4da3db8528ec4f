//! Shared fixtures for ranksort tests
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use ranksort::sorter::SortState;
use ranksort::types::{Comparison, Decision, Tier};
use std::collections::HashMap;

/// Identifiers `"a"`, `"b"`, ... for `n` items (n <= 26)
pub fn letters(n: usize) -> Vec<String> {
    (b'a'..=b'z')
        .take(n)
        .map(|c| char::from(c).to_string())
        .collect()
}

/// Decide every comparison with `strategy` until the sort ends
///
/// Returns the number of decisions taken.
pub fn drive<F>(state: &mut SortState, mut strategy: F) -> usize
where
    F: FnMut(Comparison<'_>) -> Decision,
{
    let mut taken = 0;
    while let Some(comparison) = state.current_comparison() {
        let decision = strategy(comparison);
        assert!(state.decide(decision), "pending comparison must accept a decision");
        taken += 1;
    }
    taken
}

/// Strategy that knows the true score of every identifier (lower is better)
pub fn oracle(scores: &HashMap<String, u32>) -> impl FnMut(Comparison<'_>) -> Decision + '_ {
    move |comparison: Comparison<'_>| {
        let left = scores[&comparison.left[0]];
        let right = scores[&comparison.right[0]];
        match left.cmp(&right) {
            std::cmp::Ordering::Less => Decision::Left,
            std::cmp::Ordering::Greater => Decision::Right,
            std::cmp::Ordering::Equal => Decision::Tie,
        }
    }
}

/// Tiers with each tier's identifiers sorted, for order-insensitive checks
pub fn normalized(tiers: &[Tier]) -> Vec<Vec<String>> {
    tiers
        .iter()
        .map(|tier| {
            let mut tier = tier.clone();
            tier.sort();
            tier
        })
        .collect()
}

/// Deterministic decision source for property-style tests
pub struct DecisionStream(u64);

impl DecisionStream {
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_decision(&mut self) -> Decision {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        match (self.0 >> 33) % 3 {
            0 => Decision::Left,
            1 => Decision::Right,
            _ => Decision::Tie,
        }
    }
}

/// Every identifier across all tiers, sorted
pub fn all_ids(tiers: &[Tier]) -> Vec<String> {
    let mut ids: Vec<String> = tiers.iter().flatten().cloned().collect();
    ids.sort();
    ids
}
