// src/cli/mod.rs

use clap::Parser;

pub mod handlers;

/// xcpilot: the iOS toolchain as structured, agent-friendly commands.
///
/// Every command prints one JSON envelope (`{success, data|error, details?}`)
/// to stdout; diagnostics go to stderr. The first positional argument selects
/// a command from the registry in `bin/xcpilot.rs`; everything after it is
/// handed to that command's own parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command to run (e.g. `build`, `boot`, `resolve`). Run without
    /// arguments to list all commands.
    pub action: Option<String>,

    /// Arguments for the selected command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
