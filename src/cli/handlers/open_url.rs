// src/cli/handlers/open_url.rs

use crate::cli::handlers::commons;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Opens a URL on a booted simulator.")]
struct OpenUrlArgs {
    /// The UDID of the target simulator.
    udid: String,

    /// The URL to open (any scheme the simulator understands).
    url: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let open_args = OpenUrlArgs::try_parse_from(&args)?;
    let result = commons::run_simctl(vec![
        "openurl".to_string(),
        open_args.udid,
        open_args.url,
    ])?;
    commons::emit(&commons::envelope_from(&result))
}
