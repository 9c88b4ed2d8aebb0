use git2::{Delta, DiffOptions, Repository};

use crate::error::Result;
use crate::models::{CommitDiff, DiffHunk, DiffLine, DiffStats, DiffStatus, FileDiff, LineType};

/// Changes introduced by `commit` relative to its first parent.
pub fn commit_diff(repo: &Repository, commit: &git2::Commit) -> Result<CommitDiff> {
    let to_tree = commit.tree()?;

    let (parent, from_tree) = if commit.parent_count() > 0 {
        let parent = commit.parent(0)?;
        (Some(parent.id().to_string()), Some(parent.tree()?))
    } else {
        (None, None)
    };

    let mut opts = DiffOptions::new();
    opts.context_lines(3);

    let diff = repo.diff_tree_to_tree(from_tree.as_ref(), Some(&to_tree), Some(&mut opts))?;

    let mut files: Vec<FileDiff> = Vec::new();
    let mut stats = DiffStats::default();

    for (delta_idx, delta) in diff.deltas().enumerate() {
        let status = match delta.status() {
            Delta::Added => DiffStatus::Added,
            Delta::Deleted => DiffStatus::Deleted,
            Delta::Modified => DiffStatus::Modified,
            Delta::Renamed => DiffStatus::Renamed,
            Delta::Copied => DiffStatus::Copied,
            Delta::Typechange => DiffStatus::TypeChanged,
            _ => DiffStatus::Unmodified,
        };

        let old_path = delta.old_file().path().map(|p| p.to_string_lossy().to_string());
        let new_path = delta.new_file().path().map(|p| p.to_string_lossy().to_string());

        let mut hunks: Vec<DiffHunk> = Vec::new();
        let patch = git2::Patch::from_diff(&diff, delta_idx)?;

        // Binary flags are only reliable once the patch has loaded the blobs.
        let is_binary = patch
            .as_ref()
            .map(|p| p.delta().flags().is_binary())
            .unwrap_or_else(|| delta.flags().is_binary());

        if let Some(patch) = patch {
            for hunk_idx in 0..patch.num_hunks() {
                let (hunk, _) = patch.hunk(hunk_idx)?;

                let mut lines: Vec<DiffLine> = Vec::new();

                for line_idx in 0..patch.num_lines_in_hunk(hunk_idx)? {
                    let line = patch.line_in_hunk(hunk_idx, line_idx)?;

                    let line_type = match line.origin() {
                        '+' => {
                            stats.insertions += 1;
                            LineType::Addition
                        }
                        '-' => {
                            stats.deletions += 1;
                            LineType::Deletion
                        }
                        ' ' => LineType::Context,
                        _ => LineType::Header,
                    };

                    lines.push(DiffLine {
                        line_type,
                        old_lineno: line.old_lineno(),
                        new_lineno: line.new_lineno(),
                        content: String::from_utf8_lossy(line.content()).to_string(),
                    });
                }

                hunks.push(DiffHunk {
                    old_start: hunk.old_start(),
                    old_lines: hunk.old_lines(),
                    new_start: hunk.new_start(),
                    new_lines: hunk.new_lines(),
                    header: String::from_utf8_lossy(hunk.header()).to_string(),
                    lines,
                });
            }
        }

        files.push(FileDiff {
            old_path,
            new_path,
            status,
            hunks,
            is_binary,
        });

        stats.files_changed += 1;
    }

    Ok(CommitDiff {
        parent,
        commit: commit.id().to_string(),
        files,
        stats,
    })
}
