// src/cli/handlers/resolve.rs

use crate::cli::handlers::commons;
use crate::models::Envelope;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Resolves a destination spec against live inventory.")]
struct ResolveArgs {
    /// The destination spec, e.g. `platform=iOS Simulator,name=iPhone 15`.
    destination: String,

    /// Project directory whose local config tier participates in tracking.
    #[arg(long)]
    dir: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let resolve_args = ResolveArgs::try_parse_from(&args)?;
    let dir = resolve_args
        .dir
        .as_deref()
        .map(|raw| commons::resolve_project_dir(Some(raw)))
        .transpose()?;

    let result = commons::resolved_destination(&resolve_args.destination, dir.as_deref());
    commons::emit(&Envelope::ok(serde_json::to_value(&result)?))
}
