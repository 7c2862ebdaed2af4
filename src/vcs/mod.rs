//! Git inspection for the commit and diff helpers.

pub mod detector;
pub mod submodule;

use crate::core::{ArchRepoError, ArchRepoResult};
use git2::Repository;
use std::path::{Path, PathBuf};

pub use detector::{detect_change, find_modified_pkgbuild, find_modified_submodule, PkgbuildChange};
pub use submodule::{modified_workdir_submodules, SubmoduleDiff};

/// Open the repository containing `start`
pub fn discover(start: &Path) -> ArchRepoResult<Repository> {
    let repo = Repository::discover(start)?;
    tracing::debug!(path = %repo.path().display(), "opened repository");
    Ok(repo)
}

/// Work tree of a repository (bare repositories have none)
pub fn workdir(repo: &Repository) -> ArchRepoResult<PathBuf> {
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| ArchRepoError::Path("Repository has no work tree".to_string()))
}
