// src/cli/handlers/list.rs

use crate::cli::handlers::commons;
use crate::core::inventory;
use crate::models::Envelope;
use anyhow::Result;
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists simulator devices as structured data.")]
struct ListArgs {
    /// Only include devices whose state makes them usable (Shutdown/Booted).
    #[arg(long)]
    available: bool,
}

/// The main handler for the `list` command: query `simctl list devices` and
/// reshape the listing into records.
pub fn handle(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;

    let argv = vec!["list".to_string(), "devices".to_string()];
    let result = commons::run_simctl(argv)?;
    if !result.success() {
        return commons::emit(&commons::envelope_from(&result));
    }

    let mut records = inventory::parse_device_inventory(&result.stdout);
    if list_args.available {
        records.retain(|r| r.available);
    }
    let envelope = Envelope::ok(json!({ "devices": records }));
    commons::emit(&envelope)
}
