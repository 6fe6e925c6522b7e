//! `notes`: render the release notes for a version without creating anything.

use crate::changelog::Changelog;
use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::DraftConfig;
use crate::error::Result;
use crate::git::SystemGit;
use crate::notes::{NotesContext, ReleaseNotes};
use crate::version::ReleaseVersion;

pub(super) async fn execute_notes(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Notes {
        release_version,
        target,
    } = &args.command
    else {
        unreachable!("dispatched on Notes");
    };

    let draft_config = DraftConfig::from_inputs(target.to_inputs()).await?;
    let version = ReleaseVersion::new(release_version.trim());

    let git = SystemGit::open(&draft_config.workspace)?;
    let changelog = Changelog::generate(&git, &version).await?;

    let context = NotesContext::for_draft(&draft_config, &version, &changelog);
    let body = ReleaseNotes::new()?.render(&context)?;
    config.output().result(&body)?;

    Ok(())
}
