use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use anyhow::{Context, bail};
use dunce::canonicalize;
use once_cell::sync::OnceCell;
use path_slash::PathExt as _;

use super::{CommitGraph, CommitId, GitError, GitRemoteUrl};
use crate::translate::FileHistory;

/// Global base path for repository operations, set by -C flag
static BASE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global base path for repository operations.
///
/// This should be called once at program startup from main().
/// If not called, defaults to "." (current directory).
pub fn set_base_path(path: PathBuf) {
    BASE_PATH.set(path).ok();
}

fn base_path() -> &'static PathBuf {
    static DEFAULT: OnceLock<PathBuf> = OnceLock::new();
    BASE_PATH
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(|| PathBuf::from(".")))
}

/// Values that can't change during one run.
#[derive(Debug, Default)]
struct RepoCache {
    worktree_root: OnceCell<PathBuf>,
    primary_remote: OnceCell<String>,
}

/// Repository context for git operations.
///
/// ```no_run
/// use permalink::git::{CommitGraph, Repository};
///
/// let repo = Repository::current();
/// let head = repo.head_commit()?;
/// let remote = repo.primary_remote()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    cache: RepoCache,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RepoCache::default(),
        }
    }

    /// Create a repository context for the current directory, or the `-C`
    /// path when one was given.
    pub fn current() -> Self {
        Self::at(base_path().clone())
    }

    /// Get the base path this repository was created with.
    pub fn base_path(&self) -> &Path {
        &self.path
    }

    /// Top-level directory of the working tree, canonicalized.
    pub fn worktree_root(&self) -> Result<&Path, GitError> {
        self.cache
            .worktree_root
            .get_or_try_init(|| {
                let not_a_repo = || GitError::NotARepository {
                    path: self.path.clone(),
                };
                let stdout = self
                    .run_command(&["rev-parse", "--show-toplevel"])
                    .map_err(|e| {
                        log::debug!("rev-parse --show-toplevel failed: {e:#}");
                        not_a_repo()
                    })?;
                let root = stdout.trim();
                if root.is_empty() {
                    return Err(not_a_repo());
                }
                canonicalize(root).map_err(|_| not_a_repo())
            })
            .map(PathBuf::as_path)
    }

    /// Path of `file` relative to the working tree root, with forward slashes.
    ///
    /// Relative paths are taken relative to the base path. The file must exist.
    pub fn relative_path(&self, file: &Path) -> anyhow::Result<String> {
        let root = self.worktree_root()?;
        let joined = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.path.join(file)
        };
        let absolute = canonicalize(&joined)
            .with_context(|| format!("Failed to resolve {}", file.display()))?;
        let relative = absolute
            .strip_prefix(root)
            .map_err(|_| GitError::FileOutsideRepository {
                path: absolute.clone(),
                root: root.to_path_buf(),
            })?;
        let Some(slashed) = relative.to_slash() else {
            bail!("Path is not valid UTF-8: {}", relative.display());
        };
        Ok(slashed.into_owned())
    }

    /// Get the primary remote name for this repository.
    ///
    /// 1. git's [`checkout.defaultRemote`][1] if it is set and has a URL
    /// 2. otherwise the first remote with a configured URL
    /// 3. `origin` if no remotes exist
    ///
    /// [1]: https://git-scm.com/docs/git-config#Documentation/git-config.txt-checkoutdefaultRemote
    pub fn primary_remote(&self) -> anyhow::Result<&str> {
        self.cache
            .primary_remote
            .get_or_try_init(|| {
                if let Ok(default_remote) = self.run_command(&["config", "checkout.defaultRemote"])
                {
                    let default_remote = default_remote.trim();
                    if !default_remote.is_empty() && self.remote_has_url(default_remote) {
                        return Ok(default_remote.to_string());
                    }
                }

                // Filter out phantom remotes from global config
                // (e.g. `remote.origin.prunetags=true` without a URL)
                let output = self
                    .run_command(&["config", "--get-regexp", r"remote\..+\.url"])
                    .unwrap_or_default();
                Ok(first_remote_with_url(&output)
                    .unwrap_or("origin")
                    .to_string())
            })
            .map(String::as_str)
    }

    fn remote_has_url(&self, remote: &str) -> bool {
        self.run_command(&["config", &format!("remote.{remote}.url")])
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    /// Get the URL for a remote, if configured.
    pub fn remote_url(&self, remote: &str) -> Option<String> {
        self.run_command(&["remote", "get-url", remote])
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    /// Host, owner and repository of `remote`.
    pub fn remote_web_url(&self, remote: &str) -> Result<GitRemoteUrl, GitError> {
        let url = self
            .remote_url(remote)
            .ok_or_else(|| GitError::RemoteNotConfigured {
                remote: remote.to_string(),
            })?;
        GitRemoteUrl::parse(&url).ok_or_else(|| GitError::UnparsableRemoteUrl {
            remote: remote.to_string(),
            url,
        })
    }

    /// Short name for this repository in log lines.
    ///
    /// Returns "." for the current directory, or the directory name otherwise.
    fn logging_context(&self) -> String {
        if self.path.to_str() == Some(".") {
            ".".to_string()
        } else {
            self.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string()
        }
    }

    /// Run a git command in this repository's context and return its stdout.
    ///
    /// ```no_run
    /// use permalink::git::Repository;
    ///
    /// let repo = Repository::current();
    /// let head = repo.run_command(&["rev-parse", "HEAD"])?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        self.run_command_in(&self.path, args)
    }

    fn run_command_in(&self, dir: &Path, args: &[&str]) -> anyhow::Result<String> {
        use crate::shell_exec::run;

        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(dir);

        let output = run(&mut cmd, Some(&self.logging_context()))
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).replace('\r', "\n");
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_msg = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{}", error_msg);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in stdout.trim().lines() {
            log::debug!("  {}", line);
        }
        Ok(stdout)
    }

    /// Run a git command and return whether it exited 0.
    ///
    /// For commands that answer through their exit code, like
    /// `git cat-file -e`.
    pub fn run_command_check(&self, args: &[&str]) -> anyhow::Result<bool> {
        use crate::shell_exec::run;

        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);

        let output = run(&mut cmd, Some(&self.logging_context()))
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        Ok(output.status.success())
    }
}

impl CommitGraph for Repository {
    fn head_commit(&self) -> Result<CommitId, GitError> {
        let not_a_repo = || GitError::NotARepository {
            path: self.path.clone(),
        };
        let stdout = self
            .run_command(&["rev-parse", "--verify", "HEAD"])
            .map_err(|e| {
                log::debug!("HEAD does not resolve: {e:#}");
                not_a_repo()
            })?;
        let hash = stdout.trim();
        if hash.is_empty() {
            return Err(not_a_repo());
        }
        Ok(CommitId::new(hash))
    }

    fn remote_branches_at(&self, commit: &CommitId) -> Vec<String> {
        let listing = self
            .run_command(&[
                "for-each-ref",
                "--points-at",
                commit.as_str(),
                "--format=%(refname:strip=2)",
                "refs/remotes",
            ])
            .unwrap_or_else(|e| {
                log::debug!("Branch query for {} failed: {e:#}", commit.short());
                String::new()
            });
        parse_branch_listing(&listing)
    }

    fn parents(&self, commit: &CommitId) -> Vec<CommitId> {
        let line = self
            .run_command(&["rev-list", "--parents", "-n1", commit.as_str()])
            .unwrap_or_else(|e| {
                log::debug!("Parent query for {} failed: {e:#}", commit.short());
                String::new()
            });
        parse_parents(&line)
    }
}

impl FileHistory for Repository {
    fn file_exists_at(&self, commit: &CommitId, path: &str) -> bool {
        self.run_command_check(&["cat-file", "-e", &format!("{commit}:{path}")])
            .unwrap_or(false)
    }

    fn zero_context_diff(&self, commit: &CommitId, path: &str) -> Result<String, GitError> {
        // Pathspecs are relative to the working directory, `path` to the root.
        // File names are matched literally, not as globs.
        let root = self.worktree_root()?;
        let args = [
            "--literal-pathspecs",
            "diff",
            "--no-color",
            "--no-ext-diff",
            "-U0",
            commit.as_str(),
            "--",
            path,
        ];
        self.run_command_in(root, &args)
            .map_err(|e| GitError::DiffFailed {
                command: format!("git {}", args.join(" ")),
                error: format!("{e:#}"),
            })
    }
}

/// Names from `for-each-ref --format=%(refname:strip=2)`, one per line.
fn parse_branch_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parents from `rev-list --parents -n1`: the commit itself, then its
/// parents, space separated.
fn parse_parents(output: &str) -> Vec<CommitId> {
    output
        .split_whitespace()
        .skip(1)
        .map(CommitId::from)
        .collect()
}

/// First `<name>` in `remote.<name>.url <value>` lines.
///
/// Splits on `.url ` so remote names containing dots survive.
fn first_remote_with_url(config_output: &str) -> Option<&str> {
    config_output.lines().next().and_then(|line| {
        line.strip_prefix("remote.")
            .and_then(|s| s.split_once(".url "))
            .map(|(name, _)| name)
    })
}
