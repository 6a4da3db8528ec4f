//! Interactive merge sorter
//!
//! Split the same way as the rest of the crate:
//! 1. State - `SortState`, the pure value with total operations
//! 2. Estimate - comparison bounds and progress
//! 3. Session - a state bound to a key and a store (effectful)

mod estimate;
mod session;
mod state;

pub use estimate::worst_case_comparisons;
pub use session::SortSession;
pub use state::SortState;
