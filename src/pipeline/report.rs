//! Progress reporting for drafting runs.

use std::fmt;

/// Steps of a drafting run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftStep {
    /// Reject an empty version
    CheckVersion,
    /// Unshallow the checkout if needed
    AcquireHistory,
    /// Copy or download staged build outputs
    RetrieveArtifacts,
    /// Resolve the release tag to a commit
    InspectTag,
    /// Collect commit subjects since the previous tag
    GenerateChangelog,
    /// Render the release body
    RenderNotes,
    /// Submit the draft release
    CreateRelease,
}

impl DraftStep {
    /// Every step, in order
    pub const ALL: [DraftStep; 7] = [
        DraftStep::CheckVersion,
        DraftStep::AcquireHistory,
        DraftStep::RetrieveArtifacts,
        DraftStep::InspectTag,
        DraftStep::GenerateChangelog,
        DraftStep::RenderNotes,
        DraftStep::CreateRelease,
    ];

    /// One-based position in the run
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Short human label
    pub fn label(self) -> &'static str {
        match self {
            DraftStep::CheckVersion => "Check version",
            DraftStep::AcquireHistory => "Acquire full history",
            DraftStep::RetrieveArtifacts => "Retrieve artifacts",
            DraftStep::InspectTag => "Inspect release tag",
            DraftStep::GenerateChangelog => "Generate changelog",
            DraftStep::RenderNotes => "Render release notes",
            DraftStep::CreateRelease => "Create draft release",
        }
    }
}

impl fmt::Display for DraftStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives step progress from [`ReleaseDrafter`](super::ReleaseDrafter).
///
/// Every step either finishes or is skipped after it starts, unless the run
/// fails inside it. The error then carries the detail.
pub trait DraftReporter {
    /// `step` is about to run
    fn started(&self, step: DraftStep);

    /// `step` completed
    fn finished(&self, step: DraftStep, summary: &str);

    /// `step` had nothing to do
    fn skipped(&self, step: DraftStep, reason: &str);

    /// Extra detail for verbose output
    fn detail(&self, _message: &str) {}
}

/// Reporter that forwards to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl DraftReporter for LogReporter {
    fn started(&self, step: DraftStep) {
        log::debug!("[{}/{}] {}", step.number(), DraftStep::ALL.len(), step);
    }

    fn finished(&self, step: DraftStep, summary: &str) {
        log::info!("[{}/{}] {}", step.number(), DraftStep::ALL.len(), summary);
    }

    fn skipped(&self, step: DraftStep, reason: &str) {
        log::info!(
            "[{}/{}] {} skipped: {}",
            step.number(),
            DraftStep::ALL.len(),
            step,
            reason
        );
    }

    fn detail(&self, message: &str) {
        log::debug!("{}", message);
    }
}
