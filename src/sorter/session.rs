//! Sort sessions - a sort state bound to a persistence slot
//!
//! Every effective mutation is written through to the store, so dropping a
//! session and reopening it with the same key resumes where it left off.
//! Ignored operations (nothing to decide, nothing to undo) do not write.

use super::SortState;
use super::state::dedup_items;
use crate::error::{Error, Result};
use crate::store::{SlotStore, load_state, remove_state, save_state};
use crate::types::{Comparison, Decision, Progress};
use tracing::{debug, info};

/// A sort for one dataset, persisted under `key`
#[derive(Debug)]
pub struct SortSession<S: SlotStore> {
    store: S,
    key: String,
    items: Vec<String>,
    state: Option<SortState>,
    allow_ties: bool,
}

impl<S: SlotStore> SortSession<S> {
    /// Open the session for `key`, resuming any stored state
    ///
    /// `items` is the caller's current list; it is only used by
    /// [`init`](Self::init). A stored sort keeps its own snapshot.
    pub fn open(store: S, key: impl Into<String>, items: Vec<String>) -> Result<Self> {
        let key = key.into();
        let state = load_state(&store, &key)?;
        debug!(
            key = %key,
            resumed = state.is_some(),
            items = items.len(),
            "opened sort session"
        );
        Ok(Self {
            store,
            key,
            items,
            state,
            allow_ties: true,
        })
    }

    /// Allow or refuse [`tie`](Self::tie)
    #[must_use]
    pub fn with_ties_allowed(mut self, allow_ties: bool) -> Self {
        self.allow_ties = allow_ties;
        self
    }

    /// Persistence key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The caller's current item list
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The sort state, or `None` before `init`
    pub const fn state(&self) -> Option<&SortState> {
        self.state.as_ref()
    }

    /// Whether ties are accepted
    pub const fn ties_allowed(&self) -> bool {
        self.allow_ties
    }

    /// Borrow the underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether a sort has been started and finished
    pub fn is_ended(&self) -> bool {
        self.state.as_ref().is_some_and(SortState::is_ended)
    }

    /// The comparison waiting for a decision, if any
    pub fn current_comparison(&self) -> Option<Comparison<'_>> {
        self.state.as_ref()?.current_comparison()
    }

    /// Progress of the current sort, if one has been started
    pub fn progress(&self) -> Option<Progress> {
        self.state.as_ref().map(SortState::progress)
    }

    /// Whether the stored sort was started from a different list than the
    /// caller's current one (for example after a filter change)
    pub fn items_changed(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.items() != dedup_items(self.items.iter().cloned()))
    }

    /// Start over from the current item list, discarding any progress
    pub fn init(&mut self) -> Result<()> {
        let state = SortState::new(self.items.iter().cloned());
        info!(
            key = %self.key,
            items = state.items().len(),
            status = %state.status(),
            "started sort"
        );
        self.commit(state)
    }

    /// Left candidate wins
    pub fn left(&mut self) -> Result<bool> {
        self.decide(Decision::Left)
    }

    /// Right candidate wins
    pub fn right(&mut self) -> Result<bool> {
        self.decide(Decision::Right)
    }

    /// Candidates are equal
    ///
    /// Fails with [`Error::TiesDisabled`] when ties are not allowed.
    pub fn tie(&mut self) -> Result<bool> {
        self.decide(Decision::Tie)
    }

    /// Resolve the current comparison
    ///
    /// Returns `Ok(false)` when there was nothing to decide.
    pub fn decide(&mut self, decision: Decision) -> Result<bool> {
        if decision == Decision::Tie && !self.allow_ties {
            return Err(Error::TiesDisabled);
        }
        let Some(mut state) = self.state.clone() else {
            return Ok(false);
        };
        if !state.decide(decision) {
            debug!(key = %self.key, %decision, "no comparison pending, ignored");
            return Ok(false);
        }
        debug!(
            key = %self.key,
            %decision,
            comparisons = state.comparisons_made(),
            status = %state.status(),
            "resolved comparison"
        );
        self.commit(state)?;
        Ok(true)
    }

    /// Roll back the most recent decision
    ///
    /// Returns `Ok(false)` when there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(mut state) = self.state.clone() else {
            return Ok(false);
        };
        if !state.undo() {
            return Ok(false);
        }
        debug!(
            key = %self.key,
            comparisons = state.comparisons_made(),
            "undid comparison"
        );
        self.commit(state)?;
        Ok(true)
    }

    /// Discard the sort and its stored state
    pub fn clear(&mut self) -> Result<()> {
        remove_state(&mut self.store, &self.key)?;
        self.state = None;
        info!(key = %self.key, "cleared sort");
        Ok(())
    }

    /// Write `state` through, then make it current. A failed write leaves
    /// the session untouched.
    fn commit(&mut self, state: SortState) -> Result<()> {
        save_state(&mut self.store, &self.key, &state)?;
        self.state = Some(state);
        Ok(())
    }
}
