//! Git access for release drafting.
//!
//! History queries (`describe`, `log`, `fetch`) go through the system git
//! binary; reference inspection of the release tag uses the gix library.

mod inspect;
mod operations;
mod system;

pub use inspect::{RepositoryInspector, TagTarget};
pub use operations::GitOperations;
pub use system::SystemGit;
