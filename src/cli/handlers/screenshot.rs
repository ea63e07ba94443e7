// src/cli/handlers/screenshot.rs

use crate::cli::handlers::commons;
use crate::core::paths;
use anyhow::Result;
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Captures a screenshot of a booted simulator.")]
struct ScreenshotArgs {
    /// The UDID of the target simulator.
    udid: String,

    /// File to write the screenshot to (PNG).
    output: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let screenshot_args = ScreenshotArgs::try_parse_from(&args)?;
    let output = paths::expand_user_path(&screenshot_args.output)?;
    let result = commons::run_simctl(vec![
        "io".to_string(),
        screenshot_args.udid,
        "screenshot".to_string(),
        output.display().to_string(),
    ])?;
    let envelope = commons::envelope_from(&result)
        .with_details(json!({ "exitCode": result.code, "path": output.display().to_string() }));
    commons::emit(&envelope)
}
