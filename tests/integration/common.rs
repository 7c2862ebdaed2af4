//! Common utilities for integration tests

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Isolated checkout root plus a private config home
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// `archrepo --root <temp>` with no user config and quiet logs
    pub fn archrepo(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_archrepo"));
        cmd.env("XDG_CONFIG_HOME", self.root().join(".config"))
            .env("HOME", self.root())
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.root());
        cmd
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Write a gzipped repository database with one `desc` per package
pub fn write_repository_db(path: &Path, packages: &[(&str, &str, i64)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = fs::File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, version, builddate) in packages {
        let desc = format!(
            "%FILENAME%\n{name}-{version}-x86_64.pkg.tar.zst\n\n%NAME%\n{name}\n\n%VERSION%\n{version}\n\n%BUILDDATE%\n{builddate}\n"
        );
        let mut header = tar::Header::new_gnu();
        header.set_size(desc.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("{}-{}/desc", name, version), desc.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
