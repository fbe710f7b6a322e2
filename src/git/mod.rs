//! Git operations: repository queries, the published-commit search, and
//! remote URL parsing.

use std::fmt;

mod error;
mod locate;
mod repository;
mod url;

pub use error::GitError;
pub(crate) use error::short_hash;
pub use locate::{
    CommitGraph, DEFAULT_MAX_DEPTH, PublishedCommit, SearchLimits, locate_published_commit,
};
pub use repository::{Repository, set_base_path};
pub use url::GitRemoteUrl;

/// A full commit hash as printed by git.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for messages.
    pub fn short(&self) -> &str {
        short_hash(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(hash: &str) -> Self {
        Self::new(hash)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
