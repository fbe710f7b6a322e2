//! Nearest published commit search.
//!
//! Walks the ancestry graph breadth-first from `HEAD` until it reaches a
//! commit that some remote-tracking branch points at. A link built on that
//! commit keeps resolving after local history is rewritten, because the
//! commit exists on the server.
//!
//! The queue is strict FIFO and parents are enqueued in parent-list order, so
//! commits are visited in non-decreasing depth. The first match is therefore
//! a shallowest one, with ties going to the first parent at each merge.

use std::collections::{HashSet, VecDeque};

use super::{CommitId, GitError};

/// Default number of steps the search may walk away from `HEAD`.
pub const DEFAULT_MAX_DEPTH: u32 = 20;

/// Read-only view of the ancestry graph the search walks.
///
/// Implemented by [`Repository`](super::Repository) on top of git plumbing
/// commands. The branch and parent queries are soft: a failed command is
/// reported as "nothing here" rather than an error, so one unreadable commit
/// only ends its own path.
pub trait CommitGraph {
    /// The commit the search starts from.
    fn head_commit(&self) -> Result<CommitId, GitError>;

    /// Remote-tracking branches (`origin/main`) pointing exactly at `commit`,
    /// in the order the listing produced them.
    fn remote_branches_at(&self, commit: &CommitId) -> Vec<String>;

    /// Parents of `commit` in parent-list order. Empty for a root commit.
    fn parents(&self, commit: &CommitId) -> Vec<CommitId>;
}

/// Bounds for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Paths are dropped once they reach this many steps from `HEAD`.
    pub max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The commit a permalink should point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedCommit {
    pub commit: CommitId,
    /// Remote name, the part of `branch` before the first `/`.
    /// `None` when the branch name has no `/`.
    pub remote: Option<String>,
    /// Full remote-tracking branch name, e.g. `origin/main`.
    pub branch: String,
    /// Steps from `HEAD` to `commit`.
    pub depth: u32,
}

impl PublishedCommit {
    /// Build a result from the branch listing at `commit`, or `None` if the
    /// listing is empty.
    ///
    /// The first real branch wins. `<remote>/HEAD` aliases are skipped when a
    /// named branch is also present, since they don't name a branch.
    fn from_branches(commit: &CommitId, depth: u32, branches: Vec<String>) -> Option<Self> {
        let mut names = branches
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        let first = names.next()?;
        let branch = if is_head_alias(&first) {
            std::iter::once(first.clone())
                .chain(names)
                .find(|b| !is_head_alias(b))
                .unwrap_or(first)
        } else {
            first
        };

        let remote = branch
            .split_once('/')
            .map(|(remote, _)| remote.to_string())
            .filter(|remote| !remote.is_empty());

        Some(Self {
            commit: commit.clone(),
            remote,
            branch,
            depth,
        })
    }
}

fn is_head_alias(branch: &str) -> bool {
    branch == "HEAD" || branch.ends_with("/HEAD")
}

/// One in-flight ancestry path.
#[derive(Debug)]
struct FrontierEntry {
    commit: CommitId,
    depth: u32,
}

/// Find the nearest ancestor of `HEAD` (including `HEAD` itself) that a
/// remote-tracking branch points at.
///
/// Errors with [`GitError::NotARepository`] when `HEAD` can't be resolved and
/// [`GitError::NoPublishedAncestor`] when every path ends (root commit or
/// depth limit) without a match.
pub fn locate_published_commit(
    graph: &impl CommitGraph,
    limits: SearchLimits,
) -> Result<PublishedCommit, GitError> {
    let head = graph.head_commit()?;
    log::debug!(
        "Searching for a published ancestor of {} (max depth {})",
        head.short(),
        limits.max_depth
    );

    let mut seen = HashSet::from([head.clone()]);
    let mut queue = VecDeque::from([FrontierEntry {
        commit: head,
        depth: 0,
    }]);

    while let Some(FrontierEntry { commit, depth }) = queue.pop_front() {
        let branches = graph.remote_branches_at(&commit);
        if let Some(found) = PublishedCommit::from_branches(&commit, depth, branches) {
            log::debug!(
                "Found {} at {} (depth {})",
                found.branch,
                commit.short(),
                depth
            );
            return Ok(found);
        }

        if depth >= limits.max_depth {
            log::debug!("Depth limit reached at {}", commit.short());
            continue;
        }

        // A commit reached twice is already queued at its smallest depth
        for parent in graph.parents(&commit) {
            if seen.insert(parent.clone()) {
                queue.push_back(FrontierEntry {
                    commit: parent,
                    depth: depth + 1,
                });
            }
        }
    }

    Err(GitError::NoPublishedAncestor {
        max_depth: limits.max_depth,
    })
}
