//! Building a permalink for a file in the working tree.
//!
//! The nearest published commit pins the link, and the requested lines are
//! translated back to that commit's version of the file before they go into
//! the URL fragment.

use std::path::Path;

use crate::git::{
    CommitId, GitRemoteUrl, PublishedCommit, Repository, SearchLimits, locate_published_commit,
};
use crate::translate::{FileHistory, LineRange, translate_range};

/// What part of the file the link should select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSelection {
    WholeFile,
    /// Working-tree line numbers.
    Lines(LineRange),
}

/// A resolved link and what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    pub url: String,
    pub published: PublishedCommit,
    /// Remote whose URL the link was built from.
    pub remote: String,
    /// Repository-relative path with forward slashes.
    pub path: String,
    /// Lines at the published commit, when lines were requested.
    pub lines: Option<LineRange>,
    /// False when the file did not exist yet at the published commit. Only
    /// possible for whole-file links; line links fail with `NewFile` instead.
    pub file_at_commit: bool,
}

/// `https://<host>/<owner>/<repo>/blob/<commit>/<path>[#L<n>[-L<m>]]`
///
/// Each path segment is percent-encoded; the separators are kept.
pub fn blob_url(
    remote: &GitRemoteUrl,
    commit: &CommitId,
    path: &str,
    lines: Option<LineRange>,
) -> String {
    let encoded_path = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let mut url = format!("{}/blob/{commit}/{encoded_path}", remote.web_base());
    match lines {
        None => {}
        Some(range) if range.is_single() => url.push_str(&format!("#L{}", range.start)),
        Some(range) => url.push_str(&format!("#L{}-L{}", range.start, range.end)),
    }
    url
}

/// Resolve a permalink for `file` in `repo`.
pub fn resolve(
    repo: &Repository,
    file: &Path,
    selection: LineSelection,
    limits: SearchLimits,
) -> anyhow::Result<Permalink> {
    let path = repo.relative_path(file)?;
    log::debug!("Resolving {path}");

    let published = locate_published_commit(repo, limits)?;
    log::info!(
        "Using {} from {} ({} commits behind HEAD)",
        published.commit.short(),
        published.branch,
        published.depth
    );

    let remote = match &published.remote {
        Some(remote) => remote.clone(),
        None => {
            let fallback = repo.primary_remote()?.to_string();
            log::info!(
                "Branch {} names no remote; using {fallback}",
                published.branch
            );
            fallback
        }
    };
    let remote_url = repo.remote_web_url(&remote)?;

    let (lines, file_at_commit) = match selection {
        LineSelection::WholeFile => (None, repo.file_exists_at(&published.commit, &path)),
        LineSelection::Lines(range) => {
            let translated = translate_range(repo, &published.commit, &path, range)?;
            (Some(translated), true)
        }
    };

    let url = blob_url(&remote_url, &published.commit, &path, lines);
    Ok(Permalink {
        url,
        published,
        remote,
        path,
        lines,
        file_at_commit,
    })
}
