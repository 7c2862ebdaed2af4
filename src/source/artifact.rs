use std::fs::File;
use std::path::{Path, PathBuf};

/// A release archive for one architecture or revision.
///
/// The local file name and the remote URL are fixed at construction, so the
/// same inputs always map to the same path; that is what lets an existing
/// download be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    label: String,
    file_name: String,
    url: String,
}

impl Artifact {
    pub fn new(
        label: impl Into<String>,
        file_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            file_name: file_name.into(),
            url: url.into(),
        }
    }

    /// Dropbox client tarball (`dropbox-lnx.<arch>-<version>.tar.gz`)
    pub fn dropbox(arch: &str, version: &str, download_base: &str) -> Self {
        let file_name = format!("dropbox-lnx.{}-{}.tar.gz", arch, version);
        let url = format!("{}/{}", download_base.trim_end_matches('/'), file_name);
        Self::new(arch, file_name, url)
    }

    /// Source archive GitHub generates for any ref
    /// (`<archive_base>/<owner>/<repo>/archive/<ref>.tar.gz`)
    pub fn github_archive(
        archive_base: &str,
        owner: &str,
        repo: &str,
        git_ref: &str,
        file_name: impl Into<String>,
    ) -> Self {
        let url = format!(
            "{}/{}/{}/archive/{}.tar.gz",
            archive_base.trim_end_matches('/'),
            owner,
            repo,
            git_ref
        );
        Self::new(git_ref, file_name, url)
    }

    /// Architecture or revision this artifact stands for
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local path inside `sources_dir`
    pub fn path(&self, sources_dir: &Path) -> PathBuf {
        sources_dir.join(&self.file_name)
    }

    /// Whether a readable local copy is already present
    pub fn exists(&self, sources_dir: &Path) -> bool {
        let path = self.path(sources_dir);
        path.is_file() && File::open(&path).is_ok()
    }
}
