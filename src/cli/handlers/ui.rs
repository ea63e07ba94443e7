// src/cli/handlers/ui.rs

use crate::cli::handlers::commons;
use crate::constants::IDB;
use crate::system::executor::{self, ProcessRequest};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, about = "Drives on-device UI automation through idb.")]
struct UiArgs {
    /// The UDID of the target simulator.
    #[arg(long)]
    udid: String,

    #[command(subcommand)]
    action: UiAction,
}

#[derive(Subcommand, Debug)]
enum UiAction {
    /// Dump the accessibility hierarchy of the foreground app.
    Describe,
    /// Tap at a screen coordinate.
    Tap { x: i64, y: i64 },
    /// Swipe between two screen coordinates.
    Swipe {
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        /// Swipe duration in seconds.
        #[arg(long)]
        duration: Option<f64>,
    },
    /// Type a text string into the focused element.
    Text { text: String },
    /// Press a hardware button (e.g. HOME, LOCK, SIRI).
    Button { name: String },
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let ui_args = UiArgs::try_parse_from(&args)?;
    let udid_flag = ["--udid".to_string(), ui_args.udid.clone()];

    let mut argv: Vec<String> = vec!["ui".to_string()];
    match &ui_args.action {
        UiAction::Describe => {
            argv.push("describe-all".to_string());
            argv.extend(udid_flag);
        }
        UiAction::Tap { x, y } => {
            argv.push("tap".to_string());
            argv.extend(udid_flag);
            argv.push(x.to_string());
            argv.push(y.to_string());
        }
        UiAction::Swipe { x1, y1, x2, y2, duration } => {
            argv.push("swipe".to_string());
            argv.extend(udid_flag);
            if let Some(seconds) = duration {
                argv.push("--duration".to_string());
                argv.push(seconds.to_string());
            }
            argv.push(x1.to_string());
            argv.push(y1.to_string());
            argv.push(x2.to_string());
            argv.push(y2.to_string());
        }
        UiAction::Text { text } => {
            argv.push("text".to_string());
            argv.extend(udid_flag);
            argv.push(text.clone());
        }
        UiAction::Button { name } => {
            argv.push("button".to_string());
            argv.extend(udid_flag);
            argv.push(name.clone());
        }
    }

    let result = executor::execute(&ProcessRequest::new(IDB, argv))?;
    commons::emit(&commons::envelope_from(&result))
}
