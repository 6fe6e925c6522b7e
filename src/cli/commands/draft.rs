//! `draft`: run both stages and create the draft release.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::DraftConfig;
use crate::error::{CliError, Result};
use crate::git::SystemGit;
use crate::pipeline::{ReleaseDrafter, extract_stage};

pub(super) async fn execute_draft(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Draft { tag_ref, .. } = &args.command else {
        unreachable!("dispatched on Draft");
    };
    let inputs = args.draft_inputs().ok_or_else(|| CliError::InvalidArguments {
        reason: "draft inputs unavailable".to_string(),
    })?;

    // Validate before any git or network access
    let draft_config = DraftConfig::from_inputs(inputs).await?;
    let output = config.output();

    let extracted = extract_stage(tag_ref);
    output.note(&format!("Version: {}", extracted.version));

    let git = SystemGit::open(&draft_config.workspace)?;
    let drafter = ReleaseDrafter::new(&draft_config, git, output)?;
    let outcome = drafter.run(&extracted).await?;

    if let Some(release) = &outcome.release {
        output.note(&format!("Draft release {} ready for review", outcome.version));
        output.item(&format!("Release: {}", release.html_url));
        output.item(&format!("Commits: {}", outcome.changelog.len()));
        output.item(&format!("Artifacts retrieved: {}", outcome.artifacts.len()));
    } else {
        output.result(&outcome.body)?;
    }

    Ok(())
}
