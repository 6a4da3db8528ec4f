//! Result commands - ranked output, ranking diffs, and the key listing

use crate::cli::context::CommandContext;
use crate::cli::style::Stylize;
use anstream::{print, println};
use clap::ValueEnum;
use ranksort::error::{Error, Result};
use ranksort::ranking::{assign_ranks, flatten, position_diff, to_json, to_text};
use ranksort::sorter::SortState;
use ranksort::store::{SlotStore, load_state};

/// Output format for the results command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ResultsFormat {
    /// `<rank>. <id>` lines
    #[default]
    Text,
    /// JSON with ranks and raw tiers
    Json,
}

fn finished_state(ctx: &CommandContext, key: &str) -> Result<SortState> {
    let state = ctx.stored_state(key)?;
    if !state.is_ended() {
        return Err(Error::InvalidInput(format!(
            "sort '{key}' is not finished ({}% done)",
            state.progress().percent()
        )));
    }
    Ok(state)
}

/// Run the results command
pub fn run_results(ctx: &CommandContext, key: &str, format: ResultsFormat) -> Result<()> {
    let state = finished_state(ctx, key)?;

    match format {
        ResultsFormat::Text => print!("{}", to_text(state.arr())),
        ResultsFormat::Json => println!("{}", to_json(state.arr())?),
    }
    Ok(())
}

/// Run the diff command: how each identifier moved from `base` to `other`
pub fn run_diff(ctx: &CommandContext, base: &str, other: &str) -> Result<()> {
    let base_state = finished_state(ctx, base)?;
    let other_state = finished_state(ctx, other)?;

    let base_flat = flatten(base_state.arr());
    let other_flat = flatten(other_state.arr());

    println!("{} {} {}", base.accent(), "→".muted(), other.accent());
    for entry in assign_ranks(other_state.arr()) {
        let diff = position_diff(&entry.id, &base_flat, &other_flat);
        println!("{:>4}. {} {}", entry.rank, entry.id, diff.to_string().muted());
    }

    let missing: Vec<&String> = base_flat
        .iter()
        .filter(|id| !other_flat.contains(id))
        .collect();
    for id in missing {
        println!("   -  {} {}", id, "n/a".muted());
    }
    Ok(())
}

/// Run the list command
pub fn run_list(ctx: &CommandContext) -> Result<()> {
    let keys = ctx.store.keys()?;
    if keys.is_empty() {
        println!("{}", "No sorts stored".muted());
        return Ok(());
    }

    for key in keys {
        match load_state(&ctx.store, &key) {
            Ok(Some(state)) => {
                let progress = state.progress();
                println!(
                    "{} {} {} items, {}%",
                    key.emphasis(),
                    state.status().to_string().muted(),
                    state.items().len(),
                    progress.percent()
                );
            }
            Ok(None) => {}
            Err(e) => println!("{} {}", key.emphasis(), format!("unreadable: {e}").warn()),
        }
    }
    Ok(())
}
