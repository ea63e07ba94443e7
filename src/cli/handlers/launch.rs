// src/cli/handlers/launch.rs

use crate::cli::handlers::commons;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Launches an installed app on a simulator.")]
struct LaunchArgs {
    /// The UDID of the target simulator (must be booted).
    udid: String,

    /// The bundle identifier of the app to launch.
    bundle_id: String,

    /// Arguments passed through to the launched app.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    app_args: Vec<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let launch_args = LaunchArgs::try_parse_from(&args)?;
    let mut argv = vec![
        "launch".to_string(),
        launch_args.udid,
        launch_args.bundle_id,
    ];
    argv.extend(launch_args.app_args);
    let result = commons::run_simctl(argv)?;
    commons::emit(&commons::envelope_from(&result))
}
