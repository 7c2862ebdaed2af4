use crate::core::path::ensure_parent;
use crate::core::ArchRepoResult;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::Path;

const TEMPLATES: &[(&str, &str)] = &[
    ("dropbox", include_str!("../../templates/dropbox.PKGBUILD.hbs")),
    ("ruby-trunk", include_str!("../../templates/ruby-trunk.PKGBUILD.hbs")),
    ("vim-latest", include_str!("../../templates/vim-latest.PKGBUILD.hbs")),
];

/// Renders package manifests from the embedded templates
///
/// Strict mode is on, so a placeholder without a value is an error rather
/// than an empty string. Output is not escaped: PKGBUILDs are shell.
pub struct PkgbuildRenderer {
    handlebars: Handlebars<'static>,
}

impl PkgbuildRenderer {
    pub fn new() -> ArchRepoResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        for (name, source) in TEMPLATES.iter().copied() {
            handlebars.register_template_string(name, source)?;
        }
        Ok(Self { handlebars })
    }

    /// Render the template registered under `pkgname`
    pub fn render<T: Serialize>(&self, pkgname: &str, data: &T) -> ArchRepoResult<String> {
        Ok(self.handlebars.render(pkgname, data)?)
    }

    /// Render `pkgname` and replace the file at `dest` with the result.
    ///
    /// The parent directory is created when missing; prior content is
    /// truncated, never merged.
    pub fn write<T: Serialize>(&self, dest: &Path, pkgname: &str, data: &T) -> ArchRepoResult<()> {
        let rendered = self.render(pkgname, data)?;
        ensure_parent(dest)?;
        fs::write(dest, rendered)?;
        tracing::info!(path = %dest.display(), "wrote PKGBUILD for {}", pkgname);
        Ok(())
    }
}
