use crate::core::{ArchRepoError, ArchRepoResult};
use crate::pkgbuild::VersionExtractor;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

const PRINT_VERSION: &[u8] = b"\nprintf '%s' \"${epoch:+$epoch:}$pkgver${pkgrel:+-$pkgrel}\"\n";

/// Evaluates the PKGBUILD with bash and prints the version variables.
///
/// This runs the build script, so it is only used when asked for.
#[derive(Debug, Clone)]
pub struct ShellExtractor {
    bash: PathBuf,
}

impl ShellExtractor {
    /// Locate `bash` on PATH
    pub fn new() -> ArchRepoResult<Self> {
        let bash = which::which("bash")
            .map_err(|e| ArchRepoError::Manifest(format!("bash not found: {}", e)))?;
        Ok(Self { bash })
    }
}

impl VersionExtractor for ShellExtractor {
    fn extract(&self, content: &[u8]) -> ArchRepoResult<String> {
        let mut child = Command::new(&self.bash)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            let written = stdin
                .write_all(content)
                .and_then(|_| stdin.write_all(PRINT_VERSION));
            match written {
                // bash exited before reading everything; its status tells why
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = child.wait_with_output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(ArchRepoError::Extract {
                status: output.status.code().unwrap_or(-1),
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::debug!(version = %stdout, "evaluated PKGBUILD with bash");
        Ok(stdout)
    }
}
