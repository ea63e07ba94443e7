// src/cli/handlers/recents.rs

use crate::cli::handlers::commons;
use crate::models::Envelope;
use anyhow::Result;
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Shows recently-used destinations, most recent first.")]
struct RecentsArgs {
    /// Project directory whose local config tier participates in the merge.
    #[arg(long)]
    dir: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let recents_args = RecentsArgs::try_parse_from(&args)?;
    let dir = recents_args
        .dir
        .as_deref()
        .map(|raw| commons::resolve_project_dir(Some(raw)))
        .transpose()?;

    let tracker = commons::default_tracker();
    let entries = tracker.load_ranked(dir.as_deref());
    commons::emit(&Envelope::ok(json!({ "recentSimulators": entries })))
}
