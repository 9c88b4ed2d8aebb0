//! Repository sources: turning configuration into named repositories.
//!
//! A source is one of:
//! - `Directory`: scan the immediate subdirectories of a path
//! - `Single`: one already opened repository
//! - `Mapping`: explicit name → repository pairs, in order
//!
//! Resolution happens once at startup; every failure is a configuration error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RepositoriesConfig;
use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::registry::RepositoryEntry;

#[derive(Debug)]
pub enum RepositorySource {
    Directory(PathBuf),
    Single(GitRepository),
    Mapping(Vec<(String, GitRepository)>),
}

impl RepositorySource {
    /// Build a source from the `repositories` configuration value.
    pub fn from_config(config: Option<&RepositoriesConfig>) -> Result<Self> {
        let config = config.ok_or_else(|| {
            AppError::Configuration("no repositories declared in configuration".to_string())
        })?;

        match config {
            RepositoriesConfig::Directory(path) => Ok(Self::Directory(path.clone())),
            RepositoriesConfig::Single { single } => Ok(Self::Single(open_configured(single)?)),
            RepositoriesConfig::Mapping { mapping } => {
                let mut repos = Vec::with_capacity(mapping.len());
                for (name, path) in mapping {
                    repos.push((name.clone(), open_configured(path)?));
                }
                Ok(Self::Mapping(repos))
            }
        }
    }

    /// Choose a source for a path given on the command line: a repository is
    /// served on its own, anything else is scanned as a directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if is_repository_dir(path) {
            Ok(Self::Single(open_configured(path)?))
        } else {
            Ok(Self::Directory(path.to_path_buf()))
        }
    }

    /// Resolve the source into registry entries, in registry order.
    pub fn resolve(self) -> Result<Vec<RepositoryEntry>> {
        match self {
            Self::Directory(path) => {
                let found = scan_directory(&path)?;
                let mut entries = Vec::with_capacity(found.len());
                for (name, repo_path) in found {
                    entries.push(RepositoryEntry::new(name, open_configured(&repo_path)?));
                }
                tracing::info!("Found {} repositories in {}", entries.len(), path.display());
                Ok(entries)
            }
            Self::Single(repo) => {
                let name = repo.default_name().ok_or_else(|| {
                    AppError::Configuration(format!(
                        "cannot derive a name for repository at {}",
                        repo.path.display()
                    ))
                })?;
                Ok(vec![RepositoryEntry::new(name, repo)])
            }
            Self::Mapping(repos) => repos
                .into_iter()
                .map(|(name, repo)| -> Result<RepositoryEntry> {
                    check_name(&name)?;
                    Ok(RepositoryEntry::new(name, repo))
                })
                .collect(),
        }
    }
}

/// List the repositories directly under `dir` as `(basename, path)` pairs,
/// sorted by name. Pure apart from filesystem reads, so it can be re-run.
pub fn scan_directory(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let read_dir = fs::read_dir(dir).map_err(|e| {
        AppError::Configuration(format!("cannot read repository directory {}: {}", dir.display(), e))
    })?;

    let mut found = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(|e| {
            AppError::Configuration(format!("cannot read repository directory {}: {}", dir.display(), e))
        })?;
        let entry_path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        // Skip hidden files/directories
        if name.starts_with('.') || !entry_path.is_dir() {
            continue;
        }

        if is_repository_dir(&entry_path) {
            found.push((name, entry_path));
        } else {
            tracing::debug!("Skipping {}: not a git repository", entry_path.display());
        }
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// A working copy has a `.git` entry; a bare repository has the git dir layout itself.
pub fn is_repository_dir(path: &Path) -> bool {
    path.join(".git").exists()
        || (path.join("HEAD").is_file() && path.join("objects").is_dir() && path.join("refs").is_dir())
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Configuration("repository names must not be empty".to_string()));
    }
    if name.contains('/') {
        return Err(AppError::Configuration(format!(
            "repository name '{}' must not contain '/'",
            name
        )));
    }
    Ok(())
}

fn open_configured<P: AsRef<Path>>(path: P) -> Result<GitRepository> {
    let path = path.as_ref();
    GitRepository::open(path).map_err(|_| {
        AppError::Configuration(format!("{} is not a git repository", path.display()))
    })
}
