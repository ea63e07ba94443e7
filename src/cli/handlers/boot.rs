// src/cli/handlers/boot.rs

use crate::cli::handlers::commons;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Boots a simulator by UDID.")]
struct BootArgs {
    /// The UDID of the simulator to boot.
    udid: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let boot_args = BootArgs::try_parse_from(&args)?;
    let result = commons::run_simctl(vec!["boot".to_string(), boot_args.udid])?;
    commons::emit(&commons::envelope_from(&result))
}
