//! Core types for ranksort

use serde::{Deserialize, Serialize};

/// Identifiers judged equal at one rank position
pub type Tier = Vec<String>;

/// An ordered, possibly tiered, sublist produced by a merge pass
pub type Run = Vec<Tier>;

/// Lifecycle of an initialized sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStatus {
    /// Comparisons remain
    InProgress,
    /// Final order is available
    End,
}

impl std::fmt::Display for SortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in-progress"),
            Self::End => write!(f, "end"),
        }
    }
}

/// One externally supplied answer to the current comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Left candidate is strictly better
    Left,
    /// Right candidate is strictly better
    Right,
    /// Both candidates are equal
    Tie,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// The comparison currently waiting for a decision
///
/// Each side is the head tier of its run: one identifier, or several that
/// were tied in an earlier merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison<'a> {
    /// Head tier of the left run
    pub left: &'a [String],
    /// Head tier of the right run
    pub right: &'a [String],
}

/// Progress report for a sort
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Decisions taken so far
    pub comparisons_made: usize,
    /// Upper bound on decisions still needed
    pub remaining_bound: usize,
    /// `comparisons_made + remaining_bound`; exact once the sort has ended
    pub estimated_total: usize,
    /// Worst case for the whole list, fixed at init
    pub max_comparisons: usize,
    /// Whether `estimated_total` is still an estimate
    pub is_estimate: bool,
    /// Fraction complete in `[0, 1]`, exactly 1 when ended
    pub fraction: f64,
}

impl Progress {
    /// Fraction as a whole percentage, rounded down
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        // fraction is clamped to [0, 1] so this fits
        (self.fraction.clamp(0.0, 1.0) * 100.0).floor() as u8
    }
}
