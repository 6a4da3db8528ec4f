//! ranksort - rank anything by pairwise comparison
//!
//! An interactive merge sort driven one decision at a time by a human:
//! pick left, pick right, or call it a tie. Progress is plain data, so a sort
//! can be persisted under a key, resumed later, and undone step by step.

pub mod config;
pub mod error;
pub mod ranking;
pub mod sorter;
pub mod store;
pub mod types;
