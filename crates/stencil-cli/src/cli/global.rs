//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Without this flag only warnings and errors are logged. Info shows
    /// downloads and cache hits, debug adds request URLs and skipped
    /// archive entries.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors and requested data
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also set by NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from this JSON file instead of the discovered one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
