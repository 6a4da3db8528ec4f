//! Position differences between two rankings

use serde::Serialize;

/// How an identifier moved from a base ranking to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum PositionDiff {
    /// Moved towards the top by this many places
    Up(usize),
    /// Moved towards the bottom by this many places
    Down(usize),
    /// Same position
    Same,
    /// Only present in the other ranking
    New,
    /// Not present in the other ranking
    #[serde(rename = "na")]
    NotApplicable,
}

impl std::fmt::Display for PositionDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up(n) => write!(f, "+{n}"),
            Self::Down(n) => write!(f, "-{n}"),
            Self::Same => write!(f, "="),
            Self::New => write!(f, "new"),
            Self::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// 1-based position of `id` in a flat ranking
pub fn find_position(id: &str, ranking: &[String]) -> Option<usize> {
    ranking.iter().position(|r| r == id).map(|i| i + 1)
}

/// Movement of `id` from `base` to `other`
///
/// Positions are flat list positions, not tier ranks.
pub fn position_diff(id: &str, base: &[String], other: &[String]) -> PositionDiff {
    match (find_position(id, base), find_position(id, other)) {
        (None, Some(_)) => PositionDiff::New,
        (Some(from), Some(to)) if to < from => PositionDiff::Up(from - to),
        (Some(from), Some(to)) if to > from => PositionDiff::Down(to - from),
        (Some(_), Some(_)) => PositionDiff::Same,
        _ => PositionDiff::NotApplicable,
    }
}
