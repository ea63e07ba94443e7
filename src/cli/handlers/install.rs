// src/cli/handlers/install.rs

use crate::cli::handlers::commons;
use crate::core::paths;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Installs an .app bundle on a simulator.")]
struct InstallArgs {
    /// The UDID of the target simulator (must be booted).
    udid: String,

    /// Path to the .app bundle to install.
    app_path: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let install_args = InstallArgs::try_parse_from(&args)?;
    let app_path = paths::expand_user_path(&install_args.app_path)?;
    let result = commons::run_simctl(vec![
        "install".to_string(),
        install_args.udid,
        app_path.display().to_string(),
    ])?;
    commons::emit(&commons::envelope_from(&result))
}
