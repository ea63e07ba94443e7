// src/cli/handlers/mod.rs

pub mod boot;
pub mod build;
pub mod commons;
pub mod discover;
pub mod install;
pub mod launch;
pub mod list;
pub mod open_url;
pub mod recents;
pub mod resolve;
pub mod screenshot;
pub mod shutdown;
pub mod ui;
