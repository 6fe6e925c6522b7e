//! Command execution functions.
//!
//! Each subcommand maps to one executor. Executors return `Result<()>`;
//! this module turns failures into exit code 1 and prints the error with
//! recovery suggestions.

mod changelog;
mod draft;
mod extract;
mod notes;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use changelog::execute_changelog;
use draft::execute_draft;
use extract::execute_extract_version;
use notes::execute_notes;

/// Execute the command from parsed arguments, returning the exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::ExtractVersion { .. } => execute_extract_version(&args, &config).await,
        Command::Changelog { .. } => execute_changelog(&args, &config).await,
        Command::Notes { .. } => execute_notes(&args, &config).await,
        Command::Draft { .. } => execute_draft(&args, &config).await,
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            let output = config.output();
            output.error(&format!("Command '{}' failed: {}", args.command.name(), e));
            output.suggestions(&e.recovery_suggestions());
            Ok(1)
        }
    }
}
