// src/bin/xcpilot.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use xcpilot::cli::{Cli, handlers};

// --- Command Definition and Registry ---

/// Defines a system command, its aliases, and its synchronous handler function.
/// The handler signature is kept consistent across all commands for simplicity in the registry.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all system commands.
/// To add a new command, simply add a new entry to this static array.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "boot",
        aliases: &[],
        handler: handlers::boot::handle,
    },
    CommandDefinition {
        name: "build",
        aliases: &["b"],
        handler: handlers::build::handle,
    },
    CommandDefinition {
        name: "discover",
        aliases: &["disc"],
        handler: handlers::discover::handle,
    },
    CommandDefinition {
        name: "install",
        aliases: &[],
        handler: handlers::install::handle,
    },
    CommandDefinition {
        name: "launch",
        aliases: &[],
        handler: handlers::launch::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "open-url",
        aliases: &["open"],
        handler: handlers::open_url::handle,
    },
    CommandDefinition {
        name: "recents",
        aliases: &[],
        handler: handlers::recents::handle,
    },
    CommandDefinition {
        name: "resolve",
        aliases: &["res"],
        handler: handlers::resolve::handle,
    },
    CommandDefinition {
        name: "screenshot",
        aliases: &["shot"],
        handler: handlers::screenshot::handle,
    },
    CommandDefinition {
        name: "shutdown",
        aliases: &[],
        handler: handlers::shutdown::handle,
    },
    CommandDefinition {
        name: "test",
        aliases: &["t"],
        handler: handlers::test::handle,
    },
    CommandDefinition {
        name: "ui",
        aliases: &[],
        handler: handlers::ui::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The main entry point of the `xcpilot` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// The main application dispatcher. Routes the first positional argument to
/// its registered handler and forwards everything after it untouched.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let action = match cli.action {
        Some(a) => a,
        None => {
            print_command_list();
            return Ok(());
        }
    };

    match find_command(&action) {
        Some(command) => (command.handler)(cli.args),
        None => anyhow::bail!(
            "Unknown command '{}'. Run `xcpilot` with no arguments to list commands.",
            action
        ),
    }
}

fn print_command_list() {
    println!("{}", "xcpilot - iOS toolchain operations for agents".bold());
    println!("\nAvailable commands:");
    for command in COMMAND_REGISTRY {
        if command.aliases.is_empty() {
            println!("  {}", command.name);
        } else {
            println!("  {} ({})", command.name, command.aliases.join(", "));
        }
    }
    println!("\nRun `xcpilot <command> --help` for usage of a specific command.");
}
