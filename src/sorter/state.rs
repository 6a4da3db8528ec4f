//! Sort state - the persisted, resumable unit
//!
//! Pure data plus total operations. No I/O happens here; persistence is the
//! session's job (see `session.rs`).

use crate::error::{Error, Result};
use crate::types::{Comparison, Decision, Run, SortStatus, Tier};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Bottom-up merge bookkeeping
///
/// While a comparison is pending, `left[left_pos]` and `right[right_pos]` are
/// the two candidates. Runs are stored in pass order: `merged` (finished this
/// pass), then the merge in flight, then `pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MergeCursor {
    /// Runs of the current pass that have not been merged yet
    pub(crate) pending: VecDeque<Run>,
    /// Runs produced by the current pass
    pub(crate) merged: Vec<Run>,
    /// Left run of the merge in flight
    pub(crate) left: Run,
    /// Right run of the merge in flight
    pub(crate) right: Run,
    /// Head of `left`
    pub(crate) left_pos: usize,
    /// Head of `right`
    pub(crate) right_pos: usize,
    /// Output of the merge in flight
    pub(crate) output: Run,
}

impl MergeCursor {
    fn has_comparison(&self) -> bool {
        self.left_pos < self.left.len() && self.right_pos < self.right.len()
    }

    /// Every identifier still held by the cursor, in working order
    fn identifiers(&self) -> impl Iterator<Item = &String> {
        self.merged
            .iter()
            .flatten()
            .chain(self.output.iter())
            .chain(self.left.iter().skip(self.left_pos))
            .chain(self.right.iter().skip(self.right_pos))
            .chain(self.pending.iter().flatten())
            .flatten()
    }
}

/// Interactive merge sort over opaque identifiers
///
/// Created by [`SortState::new`], advanced by [`left`](Self::left),
/// [`right`](Self::right) and [`tie`](Self::tie), rolled back by
/// [`undo`](Self::undo). Decision calls made while no comparison is pending
/// are ignored and report `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    items: Vec<String>,
    status: SortStatus,
    cursor: MergeCursor,
    /// Cursor snapshots taken before each decision
    history: Vec<MergeCursor>,
    decisions: Vec<Decision>,
    /// Final tiers, filled when `status` is `End`
    arr: Vec<Tier>,
}

impl SortState {
    /// Start a fresh sort over `items`
    ///
    /// Duplicate identifiers are collapsed to their first occurrence. Lists
    /// of zero or one item end immediately.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = dedup_items(items);
        let cursor = MergeCursor {
            pending: items.iter().map(|id| vec![vec![id.clone()]]).collect(),
            ..MergeCursor::default()
        };

        let mut state = Self {
            items,
            status: SortStatus::InProgress,
            cursor,
            history: Vec::new(),
            decisions: Vec::new(),
            arr: Vec::new(),
        };
        state.load_next_merge();
        state
    }

    /// Rebuild a state by applying `decisions` to a fresh sort of `items`
    ///
    /// Decisions past the end of the sort are ignored.
    pub fn replay<I, S>(items: I, decisions: &[Decision]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new(items);
        for &decision in decisions {
            state.decide(decision);
        }
        state
    }

    /// The universe being sorted, fixed at init
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Current lifecycle status
    pub const fn status(&self) -> SortStatus {
        self.status
    }

    /// Whether the final order is available
    pub fn is_ended(&self) -> bool {
        self.status == SortStatus::End
    }

    /// Final tiers, best first. Empty until the sort has ended.
    pub fn arr(&self) -> &[Tier] {
        &self.arr
    }

    /// Decisions taken so far, oldest first
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Number of comparisons resolved so far
    pub fn comparisons_made(&self) -> usize {
        self.decisions.len()
    }

    /// Number of decisions that can be undone
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub(crate) const fn cursor(&self) -> &MergeCursor {
        &self.cursor
    }

    /// The comparison waiting for a decision, if any
    pub fn current_comparison(&self) -> Option<Comparison<'_>> {
        if self.status != SortStatus::InProgress || !self.cursor.has_comparison() {
            return None;
        }
        Some(Comparison {
            left: &self.cursor.left[self.cursor.left_pos],
            right: &self.cursor.right[self.cursor.right_pos],
        })
    }

    /// Best-known order right now
    ///
    /// Equal to [`arr`](Self::arr) once ended. While in progress this is the
    /// concatenation of all runs, which is only partially ordered.
    pub fn working_order(&self) -> Vec<Tier> {
        if self.is_ended() {
            return self.arr.clone();
        }
        let c = &self.cursor;
        c.merged
            .iter()
            .flatten()
            .chain(c.output.iter())
            .chain(c.left.iter().skip(c.left_pos))
            .chain(c.right.iter().skip(c.right_pos))
            .chain(c.pending.iter().flatten())
            .cloned()
            .collect()
    }

    /// Left candidate wins
    pub fn left(&mut self) -> bool {
        self.decide(Decision::Left)
    }

    /// Right candidate wins
    pub fn right(&mut self) -> bool {
        self.decide(Decision::Right)
    }

    /// Candidates are equal; they become one tier
    pub fn tie(&mut self) -> bool {
        self.decide(Decision::Tie)
    }

    /// Resolve the current comparison
    ///
    /// Returns `false` (and changes nothing) when no comparison is pending.
    pub fn decide(&mut self, decision: Decision) -> bool {
        if self.current_comparison().is_none() {
            return false;
        }
        self.history.push(self.cursor.clone());
        self.decisions.push(decision);
        self.apply(decision);
        true
    }

    /// Roll back the most recent decision
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.decisions.pop();
        self.cursor = previous;
        self.status = SortStatus::InProgress;
        self.arr.clear();
        true
    }

    fn apply(&mut self, decision: Decision) {
        let c = &mut self.cursor;
        match decision {
            Decision::Left => {
                c.output.push(c.left[c.left_pos].clone());
                c.left_pos += 1;
            }
            Decision::Right => {
                c.output.push(c.right[c.right_pos].clone());
                c.right_pos += 1;
            }
            Decision::Tie => {
                let mut tier = c.left[c.left_pos].clone();
                tier.extend(c.right[c.right_pos].iter().cloned());
                c.output.push(tier);
                c.left_pos += 1;
                c.right_pos += 1;
            }
        }

        if !c.has_comparison() {
            // One side is exhausted: the rest of the other goes through as-is
            let left_rest = c.left.drain(c.left_pos..);
            c.output.extend(left_rest);
            let right_rest = c.right.drain(c.right_pos..);
            c.output.extend(right_rest);

            let run = std::mem::take(&mut c.output);
            c.merged.push(run);
            c.left.clear();
            c.right.clear();
            c.left_pos = 0;
            c.right_pos = 0;

            self.load_next_merge();
        }
    }

    /// Pull the next pair of runs into the merge slot, closing passes as
    /// they run out. Ends the sort when a single run remains.
    fn load_next_merge(&mut self) {
        loop {
            let c = &mut self.cursor;
            if c.pending.len() >= 2 {
                if let (Some(left), Some(right)) = (c.pending.pop_front(), c.pending.pop_front()) {
                    c.left = left;
                    c.right = right;
                    c.left_pos = 0;
                    c.right_pos = 0;
                    return;
                }
            }

            // Pass complete; an unpaired run carries over
            if let Some(run) = c.pending.pop_front() {
                c.merged.push(run);
            }

            if c.merged.len() <= 1 {
                self.arr = c.merged.pop().unwrap_or_default();
                self.cursor = MergeCursor::default();
                self.status = SortStatus::End;
                return;
            }

            c.pending = std::mem::take(&mut c.merged).into();
        }
    }

    /// Check the invariants a well-formed state upholds
    ///
    /// Used on states read back from storage, which may have been edited or
    /// written by an incompatible build.
    pub fn validate(&self) -> Result<()> {
        let mut unique = HashSet::new();
        if let Some(dup) = self.items.iter().find(|id| !unique.insert(id.as_str())) {
            return Err(Error::InvalidState(format!("duplicate item '{dup}'")));
        }

        if self.history.len() != self.decisions.len() {
            return Err(Error::InvalidState(format!(
                "{} history entries for {} decisions",
                self.history.len(),
                self.decisions.len()
            )));
        }

        match self.status {
            SortStatus::End => {
                if self.cursor != MergeCursor::default() {
                    return Err(Error::InvalidState(
                        "ended sort still has merge state".to_string(),
                    ));
                }
                self.check_conservation(self.arr.iter().flatten(), "final order")?;
            }
            SortStatus::InProgress => {
                if !self.arr.is_empty() {
                    return Err(Error::InvalidState(
                        "in-progress sort has a final order".to_string(),
                    ));
                }
                check_cursor_shape(&self.cursor)?;
                self.check_conservation(self.cursor.identifiers(), "merge state")?;
            }
        }

        for (depth, snapshot) in self.history.iter().enumerate() {
            check_cursor_shape(snapshot)?;
            self.check_conservation(snapshot.identifiers(), &format!("history entry {depth}"))?;
        }

        Ok(())
    }

    /// Every item appears exactly once in `ids`, and nothing else does
    fn check_conservation<'a>(
        &self,
        ids: impl Iterator<Item = &'a String>,
        what: &str,
    ) -> Result<()> {
        let mut found: Vec<&str> = ids.map(String::as_str).collect();
        let mut expected: Vec<&str> = self.items.iter().map(String::as_str).collect();
        found.sort_unstable();
        expected.sort_unstable();
        if found == expected {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "{what} holds {} identifiers, expected the {} items exactly once",
                found.len(),
                expected.len()
            )))
        }
    }
}

/// Collapse repeated identifiers, keeping first occurrences in order
pub(crate) fn dedup_items<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Into::into)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

fn check_cursor_shape(cursor: &MergeCursor) -> Result<()> {
    if !cursor.has_comparison() {
        return Err(Error::InvalidState(format!(
            "merge pointers out of range (left {}/{}, right {}/{})",
            cursor.left_pos,
            cursor.left.len(),
            cursor.right_pos,
            cursor.right.len()
        )));
    }
    let runs = cursor
        .merged
        .iter()
        .chain(cursor.pending.iter())
        .chain([&cursor.left, &cursor.right]);
    for run in runs {
        if run.is_empty() {
            return Err(Error::InvalidState("empty run".to_string()));
        }
        if run.iter().any(Vec::is_empty) {
            return Err(Error::InvalidState("empty tier".to_string()));
        }
    }
    if cursor.output.iter().any(Vec::is_empty) {
        return Err(Error::InvalidState("empty tier".to_string()));
    }
    Ok(())
}
