//! Comparison-count bounds and progress
//!
//! Exact counts depend on the answers, so the remaining work is bounded from
//! above: the rest of the bottom-up schedule is simulated with every merge
//! taking its worst case (`a + b - 1` comparisons for runs of `a` and `b`
//! tiers), using the tier counts known right now. Each decision lowers that
//! bound by at least one, which keeps `fraction` non-decreasing.

use super::state::{MergeCursor, SortState};
use crate::types::Progress;

/// Worst-case comparisons to fully sort `n` distinct items without ties
pub fn worst_case_comparisons(n: usize) -> usize {
    schedule_bound(vec![1; n])
}

/// Worst-case comparisons to merge runs of the given tier counts, in order,
/// down to a single run
fn schedule_bound(mut sizes: Vec<usize>) -> usize {
    let mut total = 0;
    while sizes.len() > 1 {
        let mut next = Vec::with_capacity(sizes.len().div_ceil(2));
        for pair in sizes.chunks(2) {
            match *pair {
                [a, b] => {
                    total += a + b - 1;
                    next.push(a + b);
                }
                [a] => next.push(a),
                _ => {}
            }
        }
        sizes = next;
    }
    total
}

/// Upper bound on comparisons still needed from this cursor
pub(crate) fn remaining_bound(cursor: &MergeCursor) -> usize {
    let left = cursor.left.len().saturating_sub(cursor.left_pos);
    let right = cursor.right.len().saturating_sub(cursor.right_pos);
    if left == 0 || right == 0 {
        return 0;
    }

    // Merge in flight
    let mut bound = left + right - 1;

    // Rest of this pass, in pass order
    let mut sizes: Vec<usize> = cursor.merged.iter().map(Vec::len).collect();
    sizes.push(cursor.output.len() + left + right);
    let pending: Vec<usize> = cursor.pending.iter().map(Vec::len).collect();
    for pair in pending.chunks(2) {
        match *pair {
            [a, b] => {
                bound += a + b - 1;
                sizes.push(a + b);
            }
            [a] => sizes.push(a),
            _ => {}
        }
    }

    bound + schedule_bound(sizes)
}

impl SortState {
    /// Progress and comparison estimate for the current state
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> Progress {
        let made = self.comparisons_made();
        let remaining = if self.is_ended() {
            0
        } else {
            remaining_bound(self.cursor())
        };
        let total = made + remaining;
        let fraction = if self.is_ended() {
            1.0
        } else if total == 0 {
            0.0
        } else {
            made as f64 / total as f64
        };

        Progress {
            comparisons_made: made,
            remaining_bound: remaining,
            estimated_total: total,
            max_comparisons: worst_case_comparisons(self.items().len()),
            is_estimate: !self.is_ended(),
            fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_case_small_lists() {
        assert_eq!(worst_case_comparisons(0), 0);
        assert_eq!(worst_case_comparisons(1), 0);
        assert_eq!(worst_case_comparisons(2), 1);
        // (1+1-1) + (2+1-1)
        assert_eq!(worst_case_comparisons(3), 3);
        // 2 * 1 + (2+2-1)
        assert_eq!(worst_case_comparisons(4), 5);
    }

    #[test]
    fn test_worst_case_power_of_two() {
        // n*log2(n) - n + 1 for powers of two
        assert_eq!(worst_case_comparisons(8), 17);
        assert_eq!(worst_case_comparisons(16), 49);
    }

    #[test]
    fn test_worst_case_never_exceeds_n_log_n() {
        for n in 2..200_usize {
            let log = usize::BITS - (n - 1).leading_zeros();
            assert!(worst_case_comparisons(n) <= n * log as usize, "n = {n}");
        }
    }

    #[test]
    fn test_fresh_state_bound_equals_worst_case() {
        let state = SortState::new(["a", "b", "c", "d", "e"]);
        let progress = state.progress();
        assert_eq!(progress.remaining_bound, worst_case_comparisons(5));
        assert_eq!(progress.estimated_total, progress.max_comparisons);
        assert!(progress.is_estimate);
        assert!(progress.fraction.abs() < f64::EPSILON);
    }
}
