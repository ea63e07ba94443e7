// src/constants.rs

use std::time::Duration;

/// The name of the user-global configuration file (in ~/.config/xcpilot/).
pub const USER_CONFIG_FILENAME: &str = "config.json";

/// The name of the optional project-local configuration file (in the project root).
pub const PROJECT_CONFIG_FILENAME: &str = ".xcpilot.json";

/// How many recently-used destinations are kept when no tier configures a limit.
pub const DEFAULT_MAX_RECENT_HISTORY: usize = 10;

/// Default wall-clock budget for an external tool invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Default cap on captured output bytes per stream.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Budget for the (fast) simulator inventory query issued during resolution.
pub const INVENTORY_TIMEOUT: Duration = Duration::from_secs(30);

/// How many alternative device names a no-match warning lists before truncating.
pub const MAX_ALTERNATIVES_IN_WARNING: usize = 5;

/// External tools. Always invoked with an explicit argument vector, never a shell.
pub const XCODEBUILD: &str = "xcodebuild";
pub const XCRUN: &str = "xcrun";
pub const IDB: &str = "idb";
