//! Rank numbering with gaps after ties

use crate::types::Tier;
use serde::Serialize;

/// One identifier with its rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based rank, shared by every identifier in a tier
    pub rank: usize,
    /// Identifier
    pub id: String,
}

/// Number tiers with standard competition ranking
///
/// A tier's rank is one more than the number of identifiers in all earlier
/// tiers, so `[[C, D], [A], [B]]` ranks C and D first, A third, B fourth.
pub fn assign_ranks(tiers: &[Tier]) -> Vec<RankedEntry> {
    let mut entries = Vec::with_capacity(tiers.iter().map(Vec::len).sum());
    let mut rank = 1;
    for tier in tiers {
        entries.extend(tier.iter().map(|id| RankedEntry {
            rank,
            id: id.clone(),
        }));
        rank += tier.len();
    }
    entries
}

/// Tiers flattened to a plain ordering
pub fn flatten(tiers: &[Tier]) -> Vec<String> {
    tiers.iter().flatten().cloned().collect()
}

/// A ranked identifier mapped back to a domain value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    /// The lookup knew this identifier
    Known {
        /// Rank of the value
        rank: usize,
        /// The value
        value: T,
    },
    /// The lookup did not know this identifier
    Unknown {
        /// Rank the identifier held
        rank: usize,
        /// The unmatched identifier
        id: String,
    },
}

impl<T> Resolved<T> {
    /// Rank of this entry
    pub const fn rank(&self) -> usize {
        match self {
            Self::Known { rank, .. } | Self::Unknown { rank, .. } => *rank,
        }
    }
}

/// Map ranked identifiers to domain values
///
/// Identifiers the lookup cannot resolve are kept as [`Resolved::Unknown`]
/// so a data inconsistency shows up in the output instead of failing.
pub fn resolve<T, F>(tiers: &[Tier], mut lookup: F) -> Vec<Resolved<T>>
where
    F: FnMut(&str) -> Option<T>,
{
    assign_ranks(tiers)
        .into_iter()
        .map(|entry| match lookup(&entry.id) {
            Some(value) => Resolved::Known {
                rank: entry.rank,
                value,
            },
            None => Resolved::Unknown {
                rank: entry.rank,
                id: entry.id,
            },
        })
        .collect()
}
