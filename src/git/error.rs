//! Permalink error types and formatting
//!
//! **`GitError`** is a typed enum for domain errors that can be pattern-matched
//! and tested. Use `.into()` to convert to `anyhow::Error` while preserving the
//! type for `downcast_ref`. Display produces styled output for users.

use std::path::PathBuf;

use color_print::cformat;

use crate::styling::{error_message, format_with_gutter, hint_message};

/// Domain errors for resolving a permalink.
///
/// Each variant stores the data needed to construct a user-facing message.
///
/// ```ignore
/// return Err(GitError::NewFile { path: "src/new.rs".into(), commit }.into());
///
/// if let Some(GitError::NoPublishedAncestor { max_depth }) = err.downcast_ref() {
///     println!("searched {max_depth} commits deep");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    // Environment errors
    /// Not inside a repository, or HEAD does not resolve (e.g. no commits yet)
    NotARepository {
        path: PathBuf,
    },
    FileOutsideRepository {
        path: PathBuf,
        root: PathBuf,
    },
    RemoteNotConfigured {
        remote: String,
    },
    UnparsableRemoteUrl {
        remote: String,
        url: String,
    },

    // Search exhaustion
    NoPublishedAncestor {
        max_depth: u32,
    },

    // Line translation
    NewFile {
        path: String,
        commit: String,
    },
    DiffFailed {
        command: String,
        error: String,
    },
    InvalidLineRange {
        start: usize,
        end: usize,
    },
}

impl std::error::Error for GitError {}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::NotARepository { path } => {
                let path = path.display();
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "Not a repository, or no resolvable head: <bold>{path}</>"
                    )),
                    hint_message("Run from inside a repository that has at least one commit")
                )
            }

            GitError::FileOutsideRepository { path, root } => {
                let (path, root) = (path.display(), root.display());
                write!(
                    f,
                    "{}",
                    error_message(cformat!(
                        "<bold>{path}</> is outside the repository at <bold>{root}</>"
                    ))
                )
            }

            GitError::RemoteNotConfigured { remote } => write!(
                f,
                "{}\n{}",
                error_message(cformat!("Remote <bold>{remote}</> has no URL configured")),
                hint_message(cformat!(
                    "To add one, run <bright-black>git remote add {remote} <<url>></>"
                ))
            ),

            GitError::UnparsableRemoteUrl { remote, url } => write!(
                f,
                "{}\n{}",
                error_message(cformat!(
                    "Can't read host, owner and repository from <bold>{remote}</> URL <bold>{url}</>"
                )),
                hint_message(
                    "Supported forms are user@host:owner/repo.git and https://host/owner/repo.git"
                )
            ),

            GitError::NoPublishedAncestor { max_depth } => write!(
                f,
                "{}\n{}",
                error_message(format!(
                    "No remote branch head found within tracking limits ({max_depth} commits)"
                )),
                hint_message(cformat!(
                    "Push the current branch, or raise the limit with <bright-black>--max-depth</>"
                ))
            ),

            GitError::NewFile { path, commit } => {
                let short = short_hash(commit);
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "<bold>{path}</> does not exist at <bold>{short}</>, so its lines have no published location"
                    )),
                    hint_message("Push a commit that contains the file, then try again")
                )
            }

            GitError::DiffFailed { command, error } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Failed to diff: <bright-black>{command}</>"))
                )?;
                if !error.trim().is_empty() {
                    write!(f, "\n{}", format_with_gutter(error))?;
                }
                Ok(())
            }

            GitError::InvalidLineRange { start, end } => write!(
                f,
                "{}\n{}",
                error_message(cformat!("Invalid line range <bold>{start}-{end}</>")),
                hint_message("Lines are 1-based and the end can't come before the start")
            ),
        }
    }
}

/// Abbreviate a commit hash for messages.
pub(crate) fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}
