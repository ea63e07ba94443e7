// src/cli/handlers/build.rs

use crate::cli::handlers::commons;
use crate::constants::XCODEBUILD;
use crate::system::executor::{self, ProcessRequest};
use anyhow::{Result, bail};
use clap::Parser;
use serde_json::json;
use std::time::Duration;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Builds a scheme with xcodebuild.")]
struct BuildArgs {
    /// Path to the .xcodeproj bundle.
    #[arg(long)]
    project: Option<String>,

    /// Path to the .xcworkspace bundle (mutually exclusive with --project).
    #[arg(long, conflicts_with = "project")]
    workspace: Option<String>,

    /// The scheme to build.
    #[arg(long)]
    scheme: String,

    /// Build configuration.
    #[arg(long, default_value = "Debug")]
    configuration: String,

    /// Destination spec; a partial one (no OS=) is resolved against live
    /// simulator inventory first.
    #[arg(long)]
    destination: String,

    /// Run a clean before the build.
    #[arg(long)]
    clean: bool,

    /// Custom derived data path.
    #[arg(long)]
    derived_data: Option<String>,

    /// Working directory (defaults to the current directory).
    #[arg(long)]
    dir: Option<String>,

    /// Override the command timeout, in seconds.
    #[arg(long)]
    timeout: Option<u64>,
}

/// The main handler for the `build` command: resolve the destination, then
/// hand a fully-assembled argument vector to xcodebuild.
pub fn handle(args: Vec<String>) -> Result<()> {
    let build_args = BuildArgs::try_parse_from(&args)?;
    if build_args.project.is_none() && build_args.workspace.is_none() {
        bail!("Either --project or --workspace is required.");
    }
    let dir = commons::resolve_project_dir(build_args.dir.as_deref())?;

    let resolution = commons::resolved_destination(&build_args.destination, Some(&dir));

    let mut argv: Vec<String> = Vec::new();
    if build_args.clean {
        argv.push("clean".to_string());
    }
    argv.push("build".to_string());
    if let Some(project) = &build_args.project {
        argv.push("-project".to_string());
        argv.push(project.clone());
    }
    if let Some(workspace) = &build_args.workspace {
        argv.push("-workspace".to_string());
        argv.push(workspace.clone());
    }
    argv.push("-scheme".to_string());
    argv.push(build_args.scheme.clone());
    argv.push("-configuration".to_string());
    argv.push(build_args.configuration.clone());
    argv.push("-destination".to_string());
    argv.push(resolution.destination.clone());
    if let Some(derived_data) = &build_args.derived_data {
        argv.push("-derivedDataPath".to_string());
        argv.push(derived_data.clone());
    }

    let mut request = ProcessRequest::new(XCODEBUILD, argv).with_cwd(&dir);
    if let Some(secs) = build_args.timeout {
        request = request.with_timeout(Duration::from_secs(secs));
    }
    let result = executor::execute(&request)?;

    let envelope = commons::envelope_from(&result)
        .with_details(json!({ "exitCode": result.code, "destination": resolution }));
    commons::emit(&envelope)
}
