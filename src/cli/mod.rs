//! Command line interface for release-drafter.
//!
//! Parses arguments, dispatches to the command executors, and renders
//! progress and errors on the terminal.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, CredentialArgs, RuntimeConfig, TargetArgs};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
