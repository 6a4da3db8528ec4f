//! Sort commands - start, decide, undo, clear, and the interactive loop

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check, progress_style};
use anstream::println;
use dialoguer::{Confirm, Select};
use indicatif::ProgressBar;
use ranksort::error::{Error, Result};
use ranksort::sorter::SortSession;
use ranksort::store::{FileStore, remove_state};
use ranksort::types::{Decision, Progress};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Options for the start command
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    /// Discard an unfinished sort without asking
    pub yes: bool,
}

/// Read an item list: one identifier per line, `#` comments and blank
/// lines ignored
pub fn read_items_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::InvalidInput(format!("failed to read {}: {e}", path.display())))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Format a tier: a single identifier, or `{a, b}` for ties
pub fn format_tier(tier: &[String]) -> String {
    match tier {
        [single] => single.clone(),
        _ => format!("{{{}}}", tier.join(", ")),
    }
}

/// Run the start command
pub fn run_start(
    ctx: &CommandContext,
    key: &str,
    items: Vec<String>,
    options: &StartOptions,
) -> Result<()> {
    let items: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();
    if items.is_empty() {
        return Err(Error::InvalidInput("no items to sort".to_string()));
    }

    let mut session = match ctx.session(key, items.clone()) {
        Ok(session) => session,
        // --yes replaces unreadable state the same way clear removes it
        Err(e @ (Error::Storage(_) | Error::InvalidState(_))) if options.yes => {
            warn!(key, error = %e, "discarding unreadable sort state");
            remove_state(&mut ctx.store.clone(), key)?;
            ctx.session(key, items)?
        }
        Err(e) => return Err(e),
    };

    let unfinished = session.state().is_some_and(|s| !s.is_ended());
    if unfinished && !options.yes {
        let made = session.progress().map_or(0, |p| p.comparisons_made);
        let discard = Confirm::new()
            .with_prompt(format!(
                "'{key}' has an unfinished sort ({made} comparisons). Discard it?"
            ))
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?;
        if !discard {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
    }

    session.init()?;

    let count = session.state().map_or(0, |s| s.items().len());
    println!(
        "{} Started {} with {} items",
        check(),
        key.accent(),
        count.accent()
    );
    print_status(&session);
    Ok(())
}

/// Run the show command
pub fn run_show(ctx: &CommandContext, key: &str) -> Result<()> {
    let session = ctx.existing_session(key)?;
    print_status(&session);
    Ok(())
}

/// Run a single decision (left, right, tie)
pub fn run_decide(ctx: &CommandContext, key: &str, decision: Decision) -> Result<()> {
    let mut session = ctx.existing_session(key)?;

    if !session.decide(decision)? {
        println!("{}", "No comparison pending".muted());
    }
    print_status(&session);
    Ok(())
}

/// Run the undo command
pub fn run_undo(ctx: &CommandContext, key: &str) -> Result<()> {
    let mut session = ctx.existing_session(key)?;

    if session.undo()? {
        println!("{} Undid last comparison", check());
    } else {
        println!("{}", "Nothing to undo".muted());
    }
    print_status(&session);
    Ok(())
}

/// Run the clear command
pub fn run_clear(ctx: &CommandContext, key: &str) -> Result<()> {
    match ctx.session(key, Vec::new()) {
        Ok(mut session) => session.clear()?,
        // Unreadable state is still removable
        Err(Error::Storage(_) | Error::InvalidState(_)) => {
            remove_state(&mut ctx.store.clone(), key)?;
        }
        Err(e) => return Err(e),
    }
    println!("{} Cleared {}", check(), key.accent());
    Ok(())
}

/// Choices offered by the interactive loop
const CHOICES: [&str; 5] = ["left", "right", "tie", "undo", "quit"];

/// Run the interactive loop until the sort ends or the user quits
pub fn run_interactive(ctx: &CommandContext, key: &str) -> Result<()> {
    let mut session = ctx.existing_session(key)?;

    let bar = ProgressBar::new(0);
    bar.set_style(progress_style());

    loop {
        let Some(progress) = session.progress() else {
            break;
        };
        update_bar(&bar, &progress);

        let Some(comparison) = session.current_comparison() else {
            break;
        };
        let left = format_tier(comparison.left);
        let right = format_tier(comparison.right);

        let mut labels = vec![
            format!("◀ {left}"),
            format!("▶ {right}"),
            "= tie".to_string(),
            "↶ undo".to_string(),
            "quit".to_string(),
        ];
        if !session.ties_allowed() {
            labels[2] = "= tie (disabled)".to_string();
        }

        let choice = bar
            .suspend(|| {
                Select::new()
                    .with_prompt("Which ranks higher?")
                    .items(&labels)
                    .default(0)
                    .interact_opt()
            })
            .map_err(|e| Error::Internal(format!("Failed to read choice: {e}")))?;

        match choice.map(|i| CHOICES[i]) {
            Some("left") => {
                session.left()?;
            }
            Some("right") => {
                session.right()?;
            }
            Some("tie") => match session.tie() {
                Err(Error::TiesDisabled) => {
                    bar.println(format!("{}", "Ties are disabled for this sort".warn()));
                }
                other => {
                    other?;
                }
            },
            Some("undo") => {
                session.undo()?;
            }
            _ => {
                bar.abandon();
                println!("{}", "Progress saved. Resume with 'ranksort run'.".muted());
                return Ok(());
            }
        }
    }

    bar.finish_and_clear();
    if session.is_ended() {
        println!(
            "{} Sort complete. See 'ranksort results {key}'.",
            check()
        );
    }
    Ok(())
}

fn update_bar(bar: &ProgressBar, progress: &Progress) {
    bar.set_length(progress.estimated_total as u64);
    bar.set_position(progress.comparisons_made as u64);
    bar.set_message(if progress.is_estimate {
        "(estimated)"
    } else {
        ""
    });
}

/// Print the current comparison and progress for a session
pub fn print_status(session: &SortSession<FileStore>) {
    let Some(state) = session.state() else {
        println!("{}", "Not started".muted());
        return;
    };
    let progress = state.progress();

    let total = if progress.is_estimate {
        format!("~{}", progress.estimated_total)
    } else {
        progress.estimated_total.to_string()
    };
    println!(
        "{} {} {}/{} comparisons ({}%)",
        session.key().emphasis(),
        state.status().to_string().muted(),
        progress.comparisons_made.accent(),
        total,
        progress.percent()
    );

    match state.current_comparison() {
        Some(comparison) => {
            println!("  {} left:  {}", arrow(), format_tier(comparison.left).accent());
            println!("  {} right: {}", arrow(), format_tier(comparison.right).accent());
        }
        None => {
            println!("  {}", "Finished. Run 'ranksort results' to see the ranking.".muted());
        }
    }
}
