//! Back-translation of working-tree line numbers to an older commit.
//!
//! The working file is diffed against the commit with zero context, so every
//! hunk boundary is exact. Each endpoint of the requested range is located
//! relative to those hunks and mapped onto the old side; lines that exist
//! only in the working file map to the nearest old line as an anchor.

mod hunk;
mod position;
mod rectify;

pub use hunk::{DiffHunk, parse_hunks};
pub use position::{HunkPosition, find_hunk_position};
pub use rectify::{Endpoint, LineRange, OldLine, reconcile, rectify};

use crate::git::{CommitId, GitError};

/// Read access to a file's history, as needed for translation.
pub trait FileHistory {
    /// Whether `path` (repository-relative, forward slashes) exists at `commit`.
    fn file_exists_at(&self, commit: &CommitId, path: &str) -> bool;

    /// Zero-context unified diff of `path` between `commit` and the working tree.
    fn zero_context_diff(&self, commit: &CommitId, path: &str) -> Result<String, GitError>;
}

/// Translate a working-tree `range` of `path` to the same lines at `commit`.
pub fn translate_range(
    history: &impl FileHistory,
    commit: &CommitId,
    path: &str,
    range: LineRange,
) -> Result<LineRange, GitError> {
    if !history.file_exists_at(commit, path) {
        return Err(GitError::NewFile {
            path: path.to_string(),
            commit: commit.to_string(),
        });
    }

    let diff = history.zero_context_diff(commit, path)?;
    let hunks = parse_hunks(&diff);
    let translated = translate_with_hunks(range, &hunks);
    log::debug!(
        "Translated {path}:{range} to {translated} at {} ({} hunks)",
        commit.short(),
        hunks.len()
    );
    Ok(translated)
}

/// Map `range` through already-parsed hunks.
pub fn translate_with_hunks(range: LineRange, hunks: &[DiffHunk]) -> LineRange {
    if hunks.is_empty() {
        return range;
    }

    let start = map_endpoint(range.start, hunks, Endpoint::Start);
    let end = map_endpoint(range.end, hunks, Endpoint::End);
    reconcile(start, end)
}

fn map_endpoint(line: usize, hunks: &[DiffHunk], endpoint: Endpoint) -> OldLine {
    let position = find_hunk_position(line, hunks);
    let old = rectify(line, position, endpoint);
    let label: &'static str = endpoint.into();
    log::debug!("{label} line {line}: {position:?} -> {old:?}");
    old
}
