//! Read (and one write) operations against named repositories.
//!
//! Every call resolves the repository through the registry first, then runs
//! under that repository's lock. Errors keep their kind so callers can tell
//! "unknown repository" from "unknown reference" from "bad input".

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::git::references::{self, find_reference};
use crate::git::repository::{commit_to_detail, find_commit};
use crate::git::{diff, log, GitRepository, LogWindow};
use crate::models::{CommitDetail, CommitDiff, CommitInfo, ReferenceInfo, RepositoryInfo};
use crate::registry::RepositoryRegistry;

pub type SharedFacade = Arc<QueryFacade>;

/// Parameters of a log request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQuery {
    pub reference: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl LogQuery {
    pub fn window(&self) -> Result<LogWindow> {
        let offset = match self.offset {
            Some(offset) if offset < 0 => {
                return Err(AppError::Validation(format!("offset must not be negative, got {}", offset)));
            }
            Some(offset) => to_usize(offset)?,
            None => 0,
        };

        let limit = match self.limit {
            Some(limit) if limit < 0 => {
                return Err(AppError::Validation(format!("limit must not be negative, got {}", limit)));
            }
            Some(limit) => Some(to_usize(limit)?),
            None => None,
        };

        Ok(LogWindow { offset, limit })
    }
}

fn to_usize(value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| AppError::Validation(format!("{} is out of range", value)))
}

pub struct QueryFacade {
    registry: RepositoryRegistry,
}

impl QueryFacade {
    pub fn new(registry: RepositoryRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    fn repository(&self, name: &str) -> Result<&GitRepository> {
        Ok(self.registry.get(name)?.handle.as_ref())
    }

    pub fn list_repositories(&self) -> Result<Vec<RepositoryInfo>> {
        self.registry
            .list()
            .map(|entry| entry.handle.info(&entry.name))
            .collect()
    }

    pub fn get_repository(&self, name: &str) -> Result<RepositoryInfo> {
        self.repository(name)?.info(name)
    }

    /// Commits reachable from `query.reference` (or HEAD), newest first.
    pub fn get_log(&self, name: &str, query: &LogQuery) -> Result<Vec<CommitInfo>> {
        let repo = self.repository(name)?;
        let window = query.window()?;

        repo.with_repo(|repo| match query.reference.as_deref() {
            Some(fullname) => {
                let reference = find_reference(repo, fullname)?;
                let start = reference.peel_to_commit().map_err(|_| {
                    AppError::Validation(format!("reference '{}' does not point at a commit", fullname))
                })?;
                log::walk_from(repo, start.id(), window)
            }
            None => log::head_log(repo, window),
        })
    }

    pub fn get_commit(&self, name: &str, hash: &str) -> Result<CommitDetail> {
        self.repository(name)?
            .with_repo(|repo| Ok(commit_to_detail(&find_commit(repo, hash)?)))
    }

    pub fn get_commit_diff(&self, name: &str, hash: &str) -> Result<CommitDiff> {
        self.repository(name)?.with_repo(|repo| {
            let commit = find_commit(repo, hash)?;
            diff::commit_diff(repo, &commit)
        })
    }

    pub fn list_references(&self, name: &str) -> Result<Vec<ReferenceInfo>> {
        self.repository(name)?.with_repo(references::list_references)
    }

    pub fn get_reference(&self, name: &str, fullname: &str) -> Result<ReferenceInfo> {
        self.repository(name)?.with_repo(|repo| {
            let reference = find_reference(repo, fullname)?;
            Ok(references::reference_to_info(&reference))
        })
    }

    /// Delete a reference. A second call for the same name fails with
    /// `ReferenceNotFound`.
    pub fn delete_reference(&self, name: &str, fullname: &str) -> Result<()> {
        self.repository(name)?
            .with_repo(|repo| references::delete_reference(repo, fullname))?;
        tracing::warn!("Deleted reference {} in repository {}", fullname, name);
        Ok(())
    }
}
