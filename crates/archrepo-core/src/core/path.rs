use crate::core::error::{ArchRepoError, ArchRepoResult};
use std::path::{Path, PathBuf};

/// File name of the per-checkout configuration.
pub const CONFIG_FILE_NAME: &str = "archrepo.yaml";

/// File name every package manifest uses.
pub const PKGBUILD_FILE_NAME: &str = "PKGBUILD";

/// Get the archrepo home directory
///
/// Platform-specific locations:
/// - Linux: ~/.config/archrepo
/// - macOS: ~/Library/Application Support/archrepo
pub fn archrepo_home() -> ArchRepoResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ArchRepoError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("archrepo"))
}

/// Get the user-wide config file path (~/.config/archrepo/archrepo.yaml)
pub fn user_config_file() -> ArchRepoResult<PathBuf> {
    Ok(archrepo_home()?.join(CONFIG_FILE_NAME))
}

/// Directory holding one repository's packaging files (`<root>/<repository>`)
pub fn repository_dir(root: &Path, repository: &str) -> PathBuf {
    root.join(repository)
}

/// Downloaded artifacts of a repository (`<root>/<repository>/sources`)
pub fn sources_dir(root: &Path, repository: &str) -> PathBuf {
    repository_dir(root, repository).join("sources")
}

/// Rendered manifest location (`<root>/<repository>/PKGBUILDs/<pkgname>/PKGBUILD`)
pub fn pkgbuild_path(root: &Path, repository: &str, pkgname: &str) -> PathBuf {
    repository_dir(root, repository)
        .join("PKGBUILDs")
        .join(pkgname)
        .join(PKGBUILD_FILE_NAME)
}

/// Create a directory (and parents) if it does not exist
pub fn ensure_dir(path: &Path) -> ArchRepoResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            ArchRepoError::Path(format!("Failed to create {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

/// Create the parent directory of a file path
pub fn ensure_parent(path: &Path) -> ArchRepoResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout() {
        let root = Path::new("/repo");
        assert_eq!(
            sources_dir(root, "aur-eagletmt"),
            PathBuf::from("/repo/aur-eagletmt/sources")
        );
        assert_eq!(
            pkgbuild_path(root, "aur-eagletmt", "dropbox"),
            PathBuf::from("/repo/aur-eagletmt/PKGBUILDs/dropbox/PKGBUILD")
        );
    }

    #[test]
    fn test_ensure_parent_creates_directories() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a").join("b").join("PKGBUILD");
        ensure_parent(&file).unwrap();
        assert!(temp.path().join("a").join("b").is_dir());

        // Idempotent
        ensure_parent(&file).unwrap();
    }

    #[test]
    fn test_ensure_parent_bare_file_name() {
        ensure_parent(Path::new("PKGBUILD")).unwrap();
    }
}
