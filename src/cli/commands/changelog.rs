//! `changelog`: print the changelog lines for a version tag.

use crate::changelog::Changelog;
use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::git::SystemGit;
use crate::version::ReleaseVersion;

pub(super) async fn execute_changelog(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Changelog {
        release_version,
        repo_path,
    } = &args.command
    else {
        unreachable!("dispatched on Changelog");
    };

    let git = SystemGit::open(repo_path)?;
    let changelog = Changelog::generate(&git, &ReleaseVersion::new(release_version.trim())).await?;

    config.output().verbose(&format!(
        "{} commit(s) since {}",
        changelog.len(),
        changelog.previous_tag
    ));
    if !changelog.is_empty() {
        config.output().result(&changelog.render())?;
    }

    Ok(())
}
