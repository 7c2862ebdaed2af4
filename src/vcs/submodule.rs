use crate::core::{ArchRepoError, ArchRepoResult};
use crate::vcs::workdir;
use git2::{Oid, Repository, SubmoduleIgnore};
use std::path::PathBuf;
use std::process::Command;

/// A submodule whose checked-out commit differs from the recorded one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleDiff {
    /// Absolute path of the submodule's work tree
    pub path: PathBuf,
    /// Commit recorded in the superproject's HEAD
    pub head_id: Oid,
    /// Commit checked out in the submodule
    pub workdir_id: Oid,
}

impl SubmoduleDiff {
    /// `git diff` invocation showing the change, paged like `git diff` would be
    pub fn command(&self, git: &std::path::Path) -> Command {
        let mut command = Command::new(git);
        command
            .env("LESS", "RX")
            .arg("--paginate")
            .arg("-C")
            .arg(&self.path)
            .arg("diff")
            .arg(self.head_id.to_string())
            .arg(self.workdir_id.to_string());
        command
    }
}

/// Submodules whose work tree moved away from the recorded commit
pub fn modified_workdir_submodules(repo: &Repository) -> ArchRepoResult<Vec<SubmoduleDiff>> {
    let root = workdir(repo)?;
    let mut diffs = Vec::new();

    for submodule in repo.submodules()? {
        let name = submodule.name().ok_or_else(|| {
            ArchRepoError::Path("Invalid UTF-8 sequence in a submodule name".to_string())
        })?;
        let status = repo.submodule_status(name, SubmoduleIgnore::Dirty)?;
        if !status.is_wd_modified() {
            continue;
        }

        match (submodule.head_id(), submodule.workdir_id()) {
            (Some(head_id), Some(workdir_id)) => diffs.push(SubmoduleDiff {
                path: root.join(submodule.path()),
                head_id,
                workdir_id,
            }),
            _ => tracing::warn!(
                submodule = name,
                "skipping submodule without both a recorded and a checked-out commit"
            ),
        }
    }

    Ok(diffs)
}

/// Run `git diff` for every modified submodule, in order
pub fn show_diffs(diffs: &[SubmoduleDiff]) -> ArchRepoResult<()> {
    if diffs.is_empty() {
        return Ok(());
    }
    let git = which::which("git")
        .map_err(|e| ArchRepoError::Path(format!("git not found: {}", e)))?;

    for diff in diffs {
        tracing::debug!(path = %diff.path.display(), "git diff {}..{}", diff.head_id, diff.workdir_id);
        let status = diff.command(&git).status()?;
        if !status.success() {
            return Err(ArchRepoError::SubprocessExit(status.code().unwrap_or(1)));
        }
    }
    Ok(())
}
