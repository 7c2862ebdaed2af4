//! Reading the declared version out of a PKGBUILD.

pub mod parser;
pub mod shell;

use crate::core::{ArchRepoError, ArchRepoResult};
pub use shell::ShellExtractor;

/// Extracts the full version (`[epoch:]pkgver[-pkgrel]`) from PKGBUILD bytes
pub trait VersionExtractor {
    fn extract(&self, content: &[u8]) -> ArchRepoResult<String>;
}

/// Reads the version from the PKGBUILD's assignments without running it
#[derive(Debug, Default, Clone, Copy)]
pub struct ParsedExtractor;

impl VersionExtractor for ParsedExtractor {
    fn extract(&self, content: &[u8]) -> ArchRepoResult<String> {
        let text = std::str::from_utf8(content)
            .map_err(|e| ArchRepoError::Manifest(format!("PKGBUILD is not UTF-8: {}", e)))?;
        let vars = parser::parse_assignments(text);

        let get = |name: &str| -> ArchRepoResult<Option<String>> {
            match vars.get(name) {
                None => Ok(None),
                Some(Ok(v)) if v.is_empty() => Ok(None),
                Some(Ok(v)) => Ok(Some(v.clone())),
                Some(Err(reason)) => Err(ArchRepoError::Manifest(format!(
                    "Cannot evaluate {} without a shell: {} (retry with --shell)",
                    name, reason
                ))),
            }
        };

        let pkgver = get("pkgver")?
            .ok_or_else(|| ArchRepoError::Manifest("pkgver is not set".to_string()))?;
        Ok(full_version(
            get("epoch")?.as_deref(),
            &pkgver,
            get("pkgrel")?.as_deref(),
        ))
    }
}

/// Join version components the way pacman displays them
pub fn full_version(epoch: Option<&str>, pkgver: &str, pkgrel: Option<&str>) -> String {
    let mut version = String::new();
    if let Some(epoch) = epoch {
        version.push_str(epoch);
        version.push(':');
    }
    version.push_str(pkgver);
    if let Some(pkgrel) = pkgrel {
        version.push('-');
        version.push_str(pkgrel);
    }
    version
}
