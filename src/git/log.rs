use git2::{ErrorCode, Oid, Repository, Sort};

use crate::error::Result;
use crate::git::repository::commit_to_info;
use crate::models::CommitInfo;

/// Slice of a log to return. `limit: None` means no upper bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogWindow {
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Log reachable from HEAD. An unborn HEAD (fresh repository) has an empty log.
pub fn head_log(repo: &Repository, window: LogWindow) -> Result<Vec<CommitInfo>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let start = head.peel_to_commit()?.id();
    walk_from(repo, start, window)
}

/// Commits reachable from `start`, newest first, cut to `window`.
pub fn walk_from(repo: &Repository, start: Oid, window: LogWindow) -> Result<Vec<CommitInfo>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push(start)?;

    let limit = window.limit.unwrap_or(usize::MAX);
    let mut commits = Vec::new();

    for oid in revwalk.skip(window.offset).take(limit) {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;
        commits.push(commit_to_info(&commit));
    }

    Ok(commits)
}
