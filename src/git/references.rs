//! Reference lookup, listing and deletion.
//!
//! Full names are checked before lookup: they must live under `refs/` and be
//! valid by git's ref naming rules. Malformed names are `Validation` errors;
//! lookup failures for well-formed names surface as `ReferenceNotFound`.

use git2::{ErrorCode, Reference, Repository};

use crate::error::{AppError, Result};
use crate::git::repository::commit_to_info;
use crate::models::{ReferenceInfo, ReferenceKind};

pub const REFS_PREFIX: &str = "refs/";

pub fn check_fullname(fullname: &str) -> Result<()> {
    let invalid = |why: &str| -> Result<()> {
        Err(AppError::Validation(format!("reference '{}' {}", fullname, why)))
    };

    let Some(rest) = fullname.strip_prefix(REFS_PREFIX) else {
        return invalid("must start with refs/");
    };
    if rest.is_empty() {
        return invalid("has no name after refs/");
    }
    if rest.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return invalid("contains an empty or relative path segment");
    }
    if !Reference::is_valid_name(fullname) {
        return invalid("is not a valid reference name");
    }

    Ok(())
}

pub fn find_reference<'r>(repo: &'r Repository, fullname: &str) -> Result<Reference<'r>> {
    check_fullname(fullname)?;

    repo.find_reference(fullname).map_err(|e| match e.code() {
        ErrorCode::NotFound => AppError::ReferenceNotFound(fullname.to_string()),
        ErrorCode::InvalidSpec => {
            AppError::Validation(format!("reference '{}' is not a valid reference name", fullname))
        }
        _ => AppError::Git(e),
    })
}

pub fn reference_to_info(reference: &Reference) -> ReferenceInfo {
    let fullname = String::from_utf8_lossy(reference.name_bytes()).to_string();

    let kind = if reference.is_branch() {
        ReferenceKind::Branch
    } else if reference.is_remote() {
        ReferenceKind::Remote
    } else if reference.is_tag() {
        ReferenceKind::Tag
    } else if reference.is_note() {
        ReferenceKind::Note
    } else {
        ReferenceKind::Other
    };

    let name = reference
        .shorthand()
        .map(|s| s.to_string())
        .unwrap_or_else(|| fullname.clone());

    let target = reference.peel_to_commit().ok().map(|c| commit_to_info(&c));

    ReferenceInfo {
        fullname,
        name,
        kind,
        target,
    }
}

pub fn list_references(repo: &Repository) -> Result<Vec<ReferenceInfo>> {
    let mut references = Vec::new();

    for reference in repo.references()? {
        let reference = reference?;
        references.push(reference_to_info(&reference));
    }

    references.sort_by(|a, b| a.fullname.cmp(&b.fullname));
    Ok(references)
}

pub fn delete_reference(repo: &Repository, fullname: &str) -> Result<()> {
    let mut reference = find_reference(repo, fullname)?;
    reference.delete().map_err(|e| match e.code() {
        ErrorCode::NotFound => AppError::ReferenceNotFound(fullname.to_string()),
        _ => AppError::Git(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_namespaced_names() {
        for name in ["refs/heads/main", "refs/tags/v1.0", "refs/remotes/origin/feature/x"] {
            assert!(check_fullname(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "",
            "main",
            "heads/main",
            "refs/",
            "refs//main",
            "refs/heads/",
            "refs/heads/../secret",
            "refs/heads/with space",
            "refs/heads/a..b",
            "refs/heads/x.lock",
            "refs/heads/a~1",
            "refs/heads/a^",
            "refs/heads/a:b",
            "refs/heads/a*",
            "refs/heads/a?",
            "refs/heads/a[b",
            "refs/heads/a\\b",
            "refs/heads/.hidden",
        ] {
            let err = check_fullname(name).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{name}");
        }
    }

    #[test]
    fn missing_reference_in_empty_repo() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let Err(err) = find_reference(&repo, "refs/heads/missing") else {
            panic!("expected error");
        };
        assert!(matches!(err, AppError::ReferenceNotFound(name) if name == "refs/heads/missing"));
        assert!(list_references(&repo).unwrap().is_empty());
    }
}
