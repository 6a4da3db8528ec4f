//! Ranked results built from a finished sort
//!
//! The sorter hands back tiers of identifiers; this layer numbers them,
//! compares rankings, and exports them. Identifiers stay opaque: mapping
//! them to domain values goes through a caller-supplied lookup.

mod diff;
mod export;
mod rank;

pub use diff::{PositionDiff, find_position, position_diff};
pub use export::{RankingExport, to_json, to_text};
pub use rank::{RankedEntry, Resolved, assign_ranks, flatten, resolve};
