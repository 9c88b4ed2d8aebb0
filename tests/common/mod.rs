//! Shared fixtures: real repositories built with git2 in temporary directories.

#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

const BASE_TIME: i64 = 1_700_000_000;

/// A working-copy repository whose commits get strictly increasing timestamps,
/// so time-sorted logs have a well-defined order.
pub struct TestRepo {
    _dir: Option<TempDir>,
    path: PathBuf,
    commits: Cell<i64>,
}

impl TestRepo {
    /// Create a new empty repository in its own temp dir.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("repo");
        Repository::init(&path).expect("failed to init repo");
        Self {
            _dir: Some(dir),
            path,
            commits: Cell::new(0),
        }
    }

    /// Create a new empty repository at `parent/name`.
    pub fn init_in(parent: &Path, name: &str) -> Self {
        let path = parent.join(name);
        Repository::init(&path).expect("failed to init repo");
        Self {
            _dir: None,
            path,
            commits: Cell::new(0),
        }
    }

    /// Create a repository with `count` commits on HEAD.
    pub fn with_commits(count: usize) -> Self {
        let repo = Self::new();
        repo.commit_many(count);
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git(&self) -> Repository {
        Repository::open(&self.path).expect("failed to open test repo")
    }

    /// Write a file and commit it on HEAD, returning the new commit id.
    pub fn commit_file(&self, file: &str, content: &str, message: &str) -> Oid {
        std::fs::write(self.path.join(file), content).unwrap();

        let repo = self.git();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let n = self.commits.get() + 1;
        self.commits.set(n);
        let sig = Signature::new("Test User", "test@example.com", &Time::new(BASE_TIME + n * 60, 0)).unwrap();

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap()
    }

    /// Make `count` commits, returning their ids oldest first.
    pub fn commit_many(&self, count: usize) -> Vec<Oid> {
        (0..count)
            .map(|i| {
                let n = self.commits.get() + 1;
                self.commit_file("log.txt", &format!("entry {n}\n"), &format!("Commit {i}"))
            })
            .collect()
    }

    pub fn create_branch(&self, name: &str, at: Oid) {
        let repo = self.git();
        let commit = repo.find_commit(at).unwrap();
        repo.branch(name, &commit, false).unwrap();
    }

    pub fn create_tag(&self, name: &str, at: Oid) {
        let repo = self.git();
        let object = repo.find_object(at, None).unwrap();
        let sig = Signature::new("Test User", "test@example.com", &Time::new(BASE_TIME, 0)).unwrap();
        repo.tag(name, &object, &sig, "release", false).unwrap();
    }

    /// Full name of the branch HEAD points at (depends on init.defaultBranch).
    pub fn head_ref(&self) -> String {
        self.git().head().unwrap().name().unwrap().to_string()
    }
}
