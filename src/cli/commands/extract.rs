//! `extract-version`: print the version for a tag reference.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::pipeline::extract_stage;
use crate::version::StepOutput;

/// Runner output key holding the version
const VERSION_KEY: &str = "VERSION";

pub(super) async fn execute_extract_version(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::ExtractVersion {
        tag_ref,
        output_file,
    } = &args.command
    else {
        unreachable!("dispatched on ExtractVersion");
    };

    let extracted = extract_stage(tag_ref);
    config.output().result(extracted.version.as_str())?;

    if let Some(path) = output_file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        StepOutput::new(path)
            .set(VERSION_KEY, extracted.version.as_str())
            .await?;
        config
            .output()
            .verbose(&format!("Wrote {}={} to {}", VERSION_KEY, extracted.version, path.display()));
    }

    Ok(())
}
