//! Text and JSON export of a ranking

use super::rank::{RankedEntry, assign_ranks};
use crate::error::Result;
use crate::types::Tier;
use serde::Serialize;
use std::fmt::Write;

/// JSON export shape
#[derive(Debug, Clone, Serialize)]
pub struct RankingExport<'a> {
    /// Ranked identifiers, best first
    pub rankings: Vec<RankedEntry>,
    /// The raw tiers the ranks were computed from
    pub tiers: &'a [Tier],
}

/// Render as pretty-printed JSON
pub fn to_json(tiers: &[Tier]) -> Result<String> {
    let export = RankingExport {
        rankings: assign_ranks(tiers),
        tiers,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Render as `"<rank>. <id>"` lines; tied identifiers share a rank
pub fn to_text(tiers: &[Tier]) -> String {
    assign_ranks(tiers)
        .iter()
        .fold(String::new(), |mut out, entry| {
            let _ = writeln!(out, "{}. {}", entry.rank, entry.id);
            out
        })
}
