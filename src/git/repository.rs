use git2::{ErrorCode, Oid, Repository};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{AuthorInfo, CommitDetail, CommitInfo, RepositoryInfo};

/// An open repository shared by every request that names it.
///
/// git2 repositories are not `Sync`, so all access goes through the mutex.
/// That also serializes reference deletion against concurrent reads.
pub struct GitRepository {
    repo: Mutex<Repository>,
    pub path: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Open the repository at exactly `path` (a working copy or a bare git dir).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::open(&path).map_err(|_| AppError::RepoNotFound(path_str))?;
        Ok(Self::from_repository(repo))
    }

    fn from_repository(repo: Repository) -> Self {
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Self {
            repo: Mutex::new(repo),
            path,
        }
    }

    /// Basename of the working directory, or of the git dir for bare repositories.
    pub fn default_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
    }

    pub fn info(&self, name: &str) -> Result<RepositoryInfo> {
        self.with_repo(|repo| {
            let head_branch = repo.head().ok().and_then(|h| {
                if h.is_branch() {
                    h.shorthand().map(|s| s.to_string())
                } else {
                    None
                }
            });

            let head_commit = repo
                .head()
                .ok()
                .and_then(|h| h.peel_to_commit().ok().map(|c| commit_to_info(&c)));

            Ok(RepositoryInfo {
                name: name.to_string(),
                path: self.path.to_string_lossy().to_string(),
                head_branch,
                head_commit,
                is_bare: repo.is_bare(),
                is_empty: repo.is_empty().unwrap_or(true),
            })
        })
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }
}

/// Look up a commit by its full or abbreviated hex hash.
pub fn find_commit<'r>(repo: &'r Repository, hash: &str) -> Result<git2::Commit<'r>> {
    let not_found = || AppError::CommitNotFound(hash.to_string());

    if !(4..=40).contains(&hash.len()) || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(not_found());
    }

    let found = if hash.len() == 40 {
        Oid::from_str(hash).and_then(|oid| repo.find_commit(oid))
    } else {
        repo.find_commit_by_prefix(hash)
    };

    found.map_err(|e| match e.code() {
        ErrorCode::NotFound | ErrorCode::Ambiguous | ErrorCode::InvalidSpec | ErrorCode::Invalid => {
            not_found()
        }
        _ => AppError::Git(e),
    })
}

fn signature_to_author(signature: &git2::Signature) -> AuthorInfo {
    AuthorInfo {
        name: signature.name().unwrap_or("Unknown").to_string(),
        email: signature.email().unwrap_or("").to_string(),
    }
}

fn short_oid(oid: Oid) -> String {
    let mut s = oid.to_string();
    s.truncate(7);
    s
}

pub fn commit_to_info(commit: &git2::Commit) -> CommitInfo {
    let timestamp = commit.time().seconds();
    CommitInfo {
        oid: commit.id().to_string(),
        short_oid: short_oid(commit.id()),
        summary: commit.summary().unwrap_or("").to_string(),
        message: commit.message().unwrap_or("").trim().to_string(),
        author: signature_to_author(&commit.author()),
        timestamp,
        relative_time: format_relative_time(timestamp),
    }
}

pub fn commit_to_detail(commit: &git2::Commit) -> CommitDetail {
    let timestamp = commit.time().seconds();
    CommitDetail {
        oid: commit.id().to_string(),
        short_oid: short_oid(commit.id()),
        summary: commit.summary().unwrap_or("").to_string(),
        message: commit.message().unwrap_or("").trim().to_string(),
        author: signature_to_author(&commit.author()),
        committer: signature_to_author(&commit.committer()),
        timestamp,
        relative_time: format_relative_time(timestamp),
        parent_count: commit.parent_count(),
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}

pub fn format_relative_time(timestamp: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}
