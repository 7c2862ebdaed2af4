//! Commit message composition and the final `git commit`.

use crate::core::{ArchRepoError, ArchRepoResult};
use std::path::Path;
use std::process::Command;

/// Message describing a package version change.
///
/// `old` is `None` for a newly added package. Versions are taken as given.
pub fn compose_message(name: &str, old: Option<&str>, new: &str) -> String {
    match old {
        Some(old) => format!("Update {} {} -> {}", name, old, new),
        None => format!("Add {} {}", name, new),
    }
}

fn commit_command(workdir: &Path, message: &str) -> ArchRepoResult<Command> {
    let git = which::which("git").map_err(|e| ArchRepoError::Path(format!("git not found: {}", e)))?;
    let mut command = Command::new(git);
    command.current_dir(workdir).arg("commit").arg("-m").arg(message);
    Ok(command)
}

/// Run `git commit -m <message>` in `workdir`, replacing this process.
///
/// Only returns on failure to start git.
#[cfg(unix)]
pub fn commit(workdir: &Path, message: &str) -> ArchRepoResult<()> {
    use std::os::unix::process::CommandExt;

    tracing::debug!(message, "exec git commit");
    let err = commit_command(workdir, message)?.exec();
    Err(ArchRepoError::Io(err))
}

/// Run `git commit -m <message>` in `workdir` and wait for it.
///
/// A non-zero git exit becomes [`ArchRepoError::SubprocessExit`].
#[cfg(not(unix))]
pub fn commit(workdir: &Path, message: &str) -> ArchRepoResult<()> {
    tracing::debug!(message, "spawn git commit");
    let status = commit_command(workdir, message)?.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(ArchRepoError::SubprocessExit(status.code().unwrap_or(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_add() {
        assert_eq!(compose_message("foo", None, "1.2.3"), "Add foo 1.2.3");
    }

    #[test]
    fn test_compose_update() {
        assert_eq!(
            compose_message("foo", Some("1.2.2"), "1.2.3"),
            "Update foo 1.2.2 -> 1.2.3"
        );
    }

    #[test]
    fn test_compose_does_not_validate_versions() {
        assert_eq!(
            compose_message("vim-latest", Some("1:9.1.0001-1"), ""),
            "Update vim-latest 1:9.1.0001-1 -> "
        );
    }

    #[test]
    fn test_commit_command_arguments() {
        let Ok(command) = commit_command(Path::new("/tmp"), "Add foo 1") else {
            return;
        };
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["commit", "-m", "Add foo 1"]);
        assert_eq!(command.get_current_dir(), Some(Path::new("/tmp")));
    }
}
