//! Git remote URL parsing.
//!
//! Parses git remote URLs into structured components (host, owner, repo).
//! Two shapes are recognised: scp-style SSH and HTTPS.

/// Parsed git remote URL with host, owner, and repository components.
///
/// # Supported URL formats
///
/// - `<user>@<host>:<owner>/<repo>.git`
/// - `https://<host>/<owner>/<repo>.git`
///
/// The `.git` suffix is optional in both.
///
/// # Example
///
/// ```
/// use permalink::git::GitRemoteUrl;
///
/// let url = GitRemoteUrl::parse("git@github.com:owner/repo.git").unwrap();
/// assert_eq!(url.host(), "github.com");
/// assert_eq!(url.owner(), "owner");
/// assert_eq!(url.repo(), "repo");
/// assert_eq!(url.project_identifier(), "github.com/owner/repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemoteUrl {
    host: String,
    owner: String,
    repo: String,
}

impl GitRemoteUrl {
    /// Parse a git remote URL into structured components.
    ///
    /// Returns `None` for malformed URLs or unsupported formats.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();

        let (host, path) = if let Some(rest) = url.strip_prefix("https://") {
            // https://[user[:token]@]github.com/owner/repo.git
            let (authority, path) = rest.split_once('/')?;
            let host = authority
                .rsplit_once('@')
                .map_or(authority, |(_, host)| host);
            (host, path)
        } else if !url.contains("://") {
            // user@github.com:owner/repo.git
            let (user_host, path) = url.split_once(':')?;
            let (user, host) = user_host.split_once('@')?;
            if user.is_empty() {
                return None;
            }
            (host, path)
        } else {
            return None;
        };

        let mut parts = path.split('/');
        let owner = parts.next()?;
        let repo_with_suffix = parts.next()?;
        // owner/repo must be the whole path; nested groups don't fit the model
        if parts.next().is_some_and(|extra| !extra.is_empty()) {
            return None;
        }

        // Strip .git suffix from repo if present
        let repo = repo_with_suffix
            .strip_suffix(".git")
            .unwrap_or(repo_with_suffix);

        // Validate non-empty
        if host.is_empty() || owner.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// The hostname (e.g., "github.com", "gitlab.example.com").
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The repository owner or organization (e.g., "owner", "company-org").
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name without .git suffix (e.g., "repo").
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Project identifier in "host/owner/repo" format.
    pub fn project_identifier(&self) -> String {
        format!("{}/{}/{}", self.host, self.owner, self.repo)
    }

    /// Web base URL for the project, e.g. `https://github.com/owner/repo`.
    pub fn web_base(&self) -> String {
        format!("https://{}", self.project_identifier())
    }
}
