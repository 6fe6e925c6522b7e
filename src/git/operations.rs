//! Git operations trait for release drafting.
//!
//! The drafter only reads history. It never commits, tags, or pushes.

use crate::error::Result;
use std::future::Future;

/// Trait defining the git queries needed to draft a release
pub trait GitOperations {
    /// Whether the checkout is missing history
    fn is_shallow(&self) -> impl Future<Output = Result<bool>>;

    /// Fetch the complete history and all tags
    fn fetch_full_history(&self) -> impl Future<Output = Result<()>>;

    /// Check if tag exists locally
    fn tag_exists(&self, tag_name: &str) -> impl Future<Output = Result<bool>>;

    /// Closest tag reachable from the parent of `tag_name`.
    ///
    /// Equivalent to `git describe --tags --abbrev=0 <tag>^`.
    fn nearest_ancestor_tag(&self, tag_name: &str) -> impl Future<Output = Result<String>>;

    /// Subject lines of commits in `(from, to]`, newest first
    fn commit_subjects(&self, from: &str, to: &str) -> impl Future<Output = Result<Vec<String>>>;

    /// Acquire complete history, unless it is already present.
    ///
    /// Returns whether a fetch happened.
    fn ensure_full_history(&self) -> impl Future<Output = Result<bool>> {
        async move {
            if self.is_shallow().await? {
                log::info!("Shallow checkout detected, fetching full history");
                self.fetch_full_history().await?;
                Ok(true)
            } else {
                log::debug!("Checkout already has full history");
                Ok(false)
            }
        }
    }
}
