// src/cli/handlers/commons.rs

// Shared functions used by multiple handlers.

use crate::constants::XCRUN;
use crate::core::destination::DestinationResolver;
use crate::core::paths;
use crate::core::usage::UsageTracker;
use crate::models::{Envelope, ResolutionResult};
use crate::system::executor::{self, ExecutionError, ProcessRequest, ProcessResult};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Prints the agent-facing JSON envelope to stdout.
pub fn emit(envelope: &Envelope) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

/// Expands and canonicalizes a user-supplied project directory, defaulting
/// to the current working directory.
pub fn resolve_project_dir(input: Option<&str>) -> Result<PathBuf> {
    match input {
        Some(raw) => {
            let expanded = paths::expand_user_path(raw)?;
            dunce::canonicalize(&expanded)
                .with_context(|| format!("Project directory '{}' not found", expanded.display()))
        }
        None => std::env::current_dir().context("Could not determine current directory"),
    }
}

/// The usage tracker at its default location, degrading to a temp-dir store
/// when no user config directory exists (tracking is advisory either way).
pub fn default_tracker() -> UsageTracker {
    UsageTracker::from_default_location().unwrap_or_else(|e| {
        log::warn!("Using temporary usage store: {}", e);
        UsageTracker::new(std::env::temp_dir().join("xcpilot"))
    })
}

/// Resolves a destination spec before handing it to a toolchain command.
/// Never fails; warnings are logged and carried inside the result.
pub fn resolved_destination(spec: &str, project_root: Option<&Path>) -> ResolutionResult {
    let tracker = default_tracker();
    let resolver = DestinationResolver::new(&tracker);
    let result = resolver.resolve(spec, project_root);
    if let Some(explanation) = &result.explanation {
        log::info!("{}", explanation);
    }
    if let Some(warning) = &result.warning {
        log::warn!("{}", warning);
    }
    result
}

/// Runs a `simctl` subcommand through the bounded executor.
pub fn run_simctl(subcommand_args: Vec<String>) -> Result<ProcessResult, ExecutionError> {
    let mut argv = vec!["simctl".to_string()];
    argv.extend(subcommand_args);
    executor::execute(&ProcessRequest::new(XCRUN, argv))
}

/// Shapes a completed tool run into the uniform envelope. A non-zero exit is
/// a failed envelope, not a process error.
pub fn envelope_from(result: &ProcessResult) -> Envelope {
    if result.success() {
        Envelope::ok(json!({ "output": result.stdout }))
            .with_details(json!({ "exitCode": result.code }))
    } else {
        let message = if result.stderr.is_empty() {
            result.stdout.clone()
        } else {
            result.stderr.clone()
        };
        Envelope::fail(message).with_details(json!({ "exitCode": result.code }))
    }
}
