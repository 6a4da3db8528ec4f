//! CLI command implementations

mod context;
mod results;
mod sort;
pub mod style;

pub use context::CommandContext;
pub use results::{ResultsFormat, run_diff, run_list, run_results};
pub use sort::{
    StartOptions, read_items_file, run_clear, run_decide, run_interactive, run_show, run_start,
    run_undo,
};
