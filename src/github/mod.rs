//! Release hosting integration

mod client;
mod release;

pub use client::GitHubClient;
pub use release::{CreatedRelease, DraftReleaseRequest, UploadedAsset};
