//! ranksort CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use ranksort::types::Decision;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{CommandContext, ResultsFormat, StartOptions};

/// Rank anything by pairwise comparison
#[derive(Parser)]
#[command(name = "ranksort", version, about = "Rank anything by pairwise comparison, with ties and undo")]
struct Cli {
    /// Directory holding sort state (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Refuse ties for this invocation
    #[arg(long, global = true)]
    no_ties: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start (or restart) a sort from a list of identifiers
    Start {
        /// Key the sort is stored under
        key: String,
        /// Comma-separated identifiers
        #[arg(long, value_delimiter = ',', conflicts_with = "file", required_unless_present = "file")]
        items: Vec<String>,
        /// File with one identifier per line
        #[arg(long)]
        file: Option<PathBuf>,
        /// Discard an unfinished sort without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the current comparison and progress
    Show {
        /// Sort key
        key: String,
    },
    /// The left candidate ranks higher
    Left {
        /// Sort key
        key: String,
    },
    /// The right candidate ranks higher
    Right {
        /// Sort key
        key: String,
    },
    /// Both candidates rank the same
    Tie {
        /// Sort key
        key: String,
    },
    /// Undo the last decision
    Undo {
        /// Sort key
        key: String,
    },
    /// Answer comparisons interactively until done
    Run {
        /// Sort key
        key: String,
    },
    /// Print the final ranking
    Results {
        /// Sort key
        key: String,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: ResultsFormat,
    },
    /// Compare two finished rankings
    Diff {
        /// Base ranking key
        base: String,
        /// Ranking compared against the base
        other: String,
    },
    /// List stored sorts
    List,
    /// Discard a sort and its stored state
    Clear {
        /// Sort key
        key: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = CommandContext::new(cli.data_dir, cli.no_ties)
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Start {
            key,
            items,
            file,
            yes,
        } => {
            let items = match file {
                Some(path) => cli::read_items_file(&path)?,
                None => items,
            };
            cli::run_start(&ctx, &key, items, &StartOptions { yes })?;
        }
        Commands::Show { key } => cli::run_show(&ctx, &key)?,
        Commands::Left { key } => cli::run_decide(&ctx, &key, Decision::Left)?,
        Commands::Right { key } => cli::run_decide(&ctx, &key, Decision::Right)?,
        Commands::Tie { key } => cli::run_decide(&ctx, &key, Decision::Tie)?,
        Commands::Undo { key } => cli::run_undo(&ctx, &key)?,
        Commands::Run { key } => cli::run_interactive(&ctx, &key)?,
        Commands::Results { key, format } => cli::run_results(&ctx, &key, format)?,
        Commands::Diff { base, other } => cli::run_diff(&ctx, &base, &other)?,
        Commands::List => cli::run_list(&ctx)?,
        Commands::Clear { key } => cli::run_clear(&ctx, &key)?,
    }

    Ok(())
}
