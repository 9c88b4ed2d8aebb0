//! Reference DTOs.
//!
//! - `ReferenceInfo`: A branch, tag or other ref with the commit it points at
//! - `ReferenceKind`: Namespace the ref lives in

use serde::{Deserialize, Serialize};

use super::CommitInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceInfo {
    /// Full name, e.g. `refs/heads/main`
    pub fullname: String,
    /// Short name, e.g. `main`
    pub name: String,
    pub kind: ReferenceKind,
    /// Commit the ref peels to, if it peels to one
    pub target: Option<CommitInfo>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Branch,
    Remote,
    Tag,
    Note,
    Other,
}
