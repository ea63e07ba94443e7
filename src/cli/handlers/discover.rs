// src/cli/handlers/discover.rs

use crate::cli::handlers::commons;
use crate::models::Envelope;
use anyhow::Result;
use clap::Parser;
use serde_json::json;
use walkdir::{DirEntry, WalkDir};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Finds Xcode projects and workspaces under a directory.")]
struct DiscoverArgs {
    /// Directory to search (defaults to the current directory).
    root: Option<String>,

    /// Maximum directory depth to descend.
    #[arg(long, default_value_t = 4)]
    depth: usize,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let discover_args = DiscoverArgs::try_parse_from(&args)?;
    let root = commons::resolve_project_dir(discover_args.root.as_deref())?;

    let mut projects: Vec<String> = Vec::new();
    let mut workspaces: Vec<String> = Vec::new();

    let walker = WalkDir::new(&root)
        .max_depth(discover_args.depth)
        .into_iter()
        // Skip hidden trees and the contents of bundles already found.
        .filter_entry(|e| {
            !is_hidden(e)
                && !e
                    .path()
                    .parent()
                    .and_then(|p| p.extension())
                    .is_some_and(|ext| ext == "xcodeproj" || ext == "xcworkspace")
        });

    for entry in walker.filter_map(Result::ok) {
        match entry.path().extension().and_then(|ext| ext.to_str()) {
            Some("xcodeproj") => projects.push(entry.path().display().to_string()),
            Some("xcworkspace") => workspaces.push(entry.path().display().to_string()),
            _ => {}
        }
    }

    projects.sort_unstable();
    workspaces.sort_unstable();
    log::debug!(
        "Discovered {} projects and {} workspaces under '{}'",
        projects.len(),
        workspaces.len(),
        root.display()
    );

    commons::emit(&Envelope::ok(json!({
        "projects": projects,
        "workspaces": workspaces,
    })))
}
