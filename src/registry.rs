//! Name-keyed repository registry.
//!
//! Built once from a `RepositorySource` and never changed afterwards; lookups
//! hand out the same shared handle every time.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::source::RepositorySource;

#[derive(Debug, Clone)]
pub struct RepositoryEntry {
    pub name: String,
    pub handle: Arc<GitRepository>,
}

impl RepositoryEntry {
    pub fn new(name: impl Into<String>, repo: GitRepository) -> Self {
        Self {
            name: name.into(),
            handle: Arc::new(repo),
        }
    }
}

#[derive(Debug, Default)]
pub struct RepositoryRegistry {
    entries: IndexMap<String, RepositoryEntry>,
}

impl RepositoryRegistry {
    /// Build a registry; names must be unique.
    pub fn new(entries: Vec<RepositoryEntry>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(entries.len());
        for entry in entries {
            match map.entry(entry.name.clone()) {
                Entry::Occupied(taken) => {
                    return Err(AppError::Configuration(format!(
                        "repository '{}' is declared more than once",
                        taken.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
        Ok(Self { entries: map })
    }

    pub fn from_source(source: RepositorySource) -> Result<Self> {
        Self::new(source.resolve()?)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_source(RepositorySource::from_config(config.repositories.as_ref())?)
    }

    pub fn get(&self, name: &str) -> Result<&RepositoryEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| AppError::RepoNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entries, in the order the source produced them.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &RepositoryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    fn open_new(dir: &TempDir, name: &str) -> GitRepository {
        let path = dir.path().join(name);
        Repository::init(&path).unwrap();
        GitRepository::open(&path).unwrap()
    }

    #[test]
    fn get_returns_the_same_handle() {
        let dir = TempDir::new().unwrap();
        let registry =
            RepositoryRegistry::new(vec![RepositoryEntry::new("alpha", open_new(&dir, "a"))]).unwrap();

        let first = registry.get("alpha").unwrap();
        let second = registry.get("alpha").unwrap();
        assert!(Arc::ptr_eq(&first.handle, &second.handle));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let registry = RepositoryRegistry::default();
        assert!(!registry.contains("alpha"));
        assert!(registry.is_empty());
        assert!(matches!(registry.get("alpha"), Err(AppError::RepoNotFound(name)) if name == "alpha"));
    }

    #[test]
    fn list_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let registry = RepositoryRegistry::new(vec![
            RepositoryEntry::new("zulu", open_new(&dir, "z")),
            RepositoryEntry::new("alpha", open_new(&dir, "a")),
        ])
        .unwrap();

        let names: Vec<&str> = registry.list().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "alpha"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("zulu"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let err = RepositoryRegistry::new(vec![
            RepositoryEntry::new("alpha", open_new(&dir, "a")),
            RepositoryEntry::new("alpha", open_new(&dir, "b")),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("'alpha'")));
    }
}
