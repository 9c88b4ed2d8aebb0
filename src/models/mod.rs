//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for API consumers.
//! - `commit`: CommitInfo (log rows), CommitDetail, AuthorInfo
//! - `reference`: ReferenceInfo, ReferenceKind
//! - `repository`: RepositoryInfo (repository list and landing page)
//! - `diff`: CommitDiff, FileDiff, DiffHunk, DiffLine

pub mod commit;
pub mod diff;
pub mod reference;
pub mod repository;

pub use commit::*;
pub use diff::*;
pub use reference::*;
pub use repository::*;
