use crate::core::path::PKGBUILD_FILE_NAME;
use crate::core::{ArchRepoError, ArchRepoResult};
use git2::{Oid, Repository, Status, StatusOptions, SubmoduleIgnore};
use std::ffi::OsStr;
use std::path::Path;

/// A staged PKGBUILD change: what is about to be committed and what HEAD has
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgbuildChange {
    pub pkgname: String,
    pub new_pkgbuild: Vec<u8>,
    /// `None` when the package is new
    pub old_pkgbuild: Option<Vec<u8>>,
}

/// Find the single staged change: a PKGBUILD in the work tree first, then a
/// submodule whose recorded commit moved.
pub fn detect_change(repo: &Repository) -> ArchRepoResult<PkgbuildChange> {
    if let Some(change) = find_modified_pkgbuild(repo)? {
        return Ok(change);
    }
    if let Some(change) = find_modified_submodule(repo)? {
        return Ok(change);
    }
    Err(ArchRepoError::NothingToDo)
}

/// Staged (modified or added) files named `PKGBUILD`.
///
/// Zero matches is `Ok(None)`; more than one refuses to guess.
pub fn find_modified_pkgbuild(repo: &Repository) -> ArchRepoResult<Option<PkgbuildChange>> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(false)
        .include_ignored(false)
        .exclude_submodules(true);

    let statuses = repo.statuses(Some(&mut opts))?;
    let mut staged = Vec::new();
    for entry in statuses.iter() {
        if !entry
            .status()
            .intersects(Status::INDEX_MODIFIED | Status::INDEX_NEW)
        {
            continue;
        }
        let Some(path) = entry.path() else { continue };
        if Path::new(path).file_name() == Some(OsStr::new(PKGBUILD_FILE_NAME)) {
            staged.push(path.to_string());
        }
    }

    let path = match staged.len() {
        0 => return Ok(None),
        1 => staged.remove(0),
        _ => return Err(ArchRepoError::Ambiguous("PKGBUILDs".to_string())),
    };
    let path = Path::new(&path);
    tracing::debug!(path = %path.display(), "found staged PKGBUILD");

    let index = repo.index()?;
    let entry = index
        .get_path(path, 0)
        .ok_or_else(|| ArchRepoError::Path(format!("{} is not in the index", path.display())))?;
    let new_pkgbuild = repo.find_blob(entry.id)?.content().to_vec();

    let old_pkgbuild = match repo.head() {
        Ok(head) => {
            let tree = head.peel_to_tree()?;
            match tree.get_path(path) {
                Ok(tree_entry) => Some(repo.find_blob(tree_entry.id())?.content().to_vec()),
                Err(e) if e.code() == git2::ErrorCode::NotFound => None,
                Err(e) => return Err(e.into()),
            }
        }
        // Unborn HEAD: nothing committed yet
        Err(_) => None,
    };

    let pkgname = path
        .parent()
        .and_then(path_to_pkgname)
        .ok_or_else(|| {
            ArchRepoError::Path(format!(
                "Cannot tell the package name of {}",
                path.display()
            ))
        })?;

    Ok(Some(PkgbuildChange {
        pkgname,
        new_pkgbuild,
        old_pkgbuild,
    }))
}

/// Submodules whose staged commit differs from HEAD's (or that were just added).
///
/// Zero matches is `Ok(None)`; more than one refuses to guess.
pub fn find_modified_submodule(repo: &Repository) -> ArchRepoResult<Option<PkgbuildChange>> {
    let mut modified = Vec::new();
    for submodule in repo.submodules()? {
        let name = submodule.name().ok_or_else(|| {
            ArchRepoError::Path("Invalid UTF-8 sequence in a submodule name".to_string())
        })?;
        let status = repo.submodule_status(name, SubmoduleIgnore::Dirty)?;
        if status.is_index_modified() || status.is_index_added() {
            modified.push(submodule);
        }
    }

    let submodule = match modified.len() {
        0 => return Ok(None),
        1 => modified.remove(0),
        _ => return Err(ArchRepoError::Ambiguous("submodules".to_string())),
    };
    tracing::debug!(path = %submodule.path().display(), "found staged submodule");

    let sub_repo = submodule.open()?;
    let index_id = submodule.index_id().ok_or_else(|| {
        ArchRepoError::Path(format!(
            "Unable to get the staged commit of {}",
            submodule.path().display()
        ))
    })?;
    let new_pkgbuild = pkgbuild_at(&sub_repo, index_id)?;
    let old_pkgbuild = match submodule.head_id() {
        Some(head_id) => Some(pkgbuild_at(&sub_repo, head_id)?),
        None => None,
    };

    let pkgname = path_to_pkgname(submodule.path()).ok_or_else(|| {
        ArchRepoError::Path(format!(
            "Cannot tell the package name of {}",
            submodule.path().display()
        ))
    })?;

    Ok(Some(PkgbuildChange {
        pkgname,
        new_pkgbuild,
        old_pkgbuild,
    }))
}

/// PKGBUILD content at the root of `commit_oid`'s tree
fn pkgbuild_at(repo: &Repository, commit_oid: Oid) -> ArchRepoResult<Vec<u8>> {
    let commit = repo.find_commit(commit_oid)?;
    let tree = commit.tree()?;
    let entry = tree.get_path(Path::new(PKGBUILD_FILE_NAME))?;
    let blob = repo.find_blob(entry.id())?;
    Ok(blob.content().to_vec())
}

fn path_to_pkgname(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}
