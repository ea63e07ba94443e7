// src/cli/handlers/shutdown.rs

use crate::cli::handlers::commons;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Shuts down a simulator (or all of them).")]
struct ShutdownArgs {
    /// The UDID of the simulator to shut down, or `all`.
    #[arg(default_value = "all")]
    udid: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let shutdown_args = ShutdownArgs::try_parse_from(&args)?;
    let result = commons::run_simctl(vec!["shutdown".to_string(), shutdown_args.udid])?;
    commons::emit(&commons::envelope_from(&result))
}
