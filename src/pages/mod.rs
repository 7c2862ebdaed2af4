//! Static HTML index pages for the package repositories.
//!
//! Each configured repository's `<repo>.db` is read from a local mirror of
//! the repository tree, and one page per repository plus a top-level index
//! are written out.
//!
//! Only the local directory is written. Publishing it to the web host is a
//! separate step, e.g. `aws s3 sync <out_dir> s3://<bucket>/`.

pub mod database;
pub mod desc;

pub use database::read_repository_db;
pub use desc::{parse_desc, PackageEntry};

use crate::config::Config;
use crate::core::path::ensure_parent;
use crate::core::ArchRepoResult;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html.hbs");
const REPOSITORY_TEMPLATE: &str = include_str!("../../templates/repository.html.hbs");

#[derive(Debug, Serialize)]
struct IndexInput<'a> {
    repositories: &'a [String],
}

#[derive(Debug, Serialize)]
struct RepositoryInput<'a> {
    name: &'a str,
    arch: &'a str,
    packages: Vec<PackageEntry>,
}

/// `<db_dir>/<repo>/os/<arch>/<repo>.db`
pub fn repository_db_path(db_dir: &Path, repository: &str, arch: &str) -> PathBuf {
    db_dir
        .join(repository)
        .join("os")
        .join(arch)
        .join(format!("{}.db", repository))
}

fn page_renderer() -> ArchRepoResult<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_template_string("index", INDEX_TEMPLATE)?;
    handlebars.register_template_string("repository", REPOSITORY_TEMPLATE)?;
    Ok(handlebars)
}

/// Render `index.html` and `<repo>/index.html` into `out_dir`.
///
/// Returns the written files, index first.
pub fn render_pages(config: &Config, db_dir: &Path, out_dir: &Path) -> ArchRepoResult<Vec<PathBuf>> {
    let handlebars = page_renderer()?;
    let repositories = &config.pages.repositories;
    let mut written = Vec::with_capacity(repositories.len() + 1);

    let index = out_dir.join("index.html");
    write_page(&index, &handlebars.render("index", &IndexInput { repositories })?)?;
    written.push(index);

    for repository in repositories {
        let db = repository_db_path(db_dir, repository, &config.pages.arch);
        let packages = read_repository_db(&db)?;
        tracing::info!(repository = %repository, packages = packages.len(), "rendering page");

        let input = RepositoryInput {
            name: repository,
            arch: &config.pages.arch,
            packages,
        };
        let page = out_dir.join(repository).join("index.html");
        write_page(&page, &handlebars.render("repository", &input)?)?;
        written.push(page);
    }

    Ok(written)
}

fn write_page(dest: &Path, html: &str) -> ArchRepoResult<()> {
    ensure_parent(dest)?;
    fs::write(dest, html)?;
    tracing::debug!(path = %dest.display(), "wrote page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArchRepoError;
    use crate::pages::database::tests::write_db;
    use tempfile::TempDir;

    fn config(repositories: &[&str]) -> Config {
        let mut config = Config::default();
        config.pages.repositories = repositories.iter().map(|r| r.to_string()).collect();
        config
    }

    #[test]
    fn test_repository_db_path() {
        assert_eq!(
            repository_db_path(Path::new("/srv"), "vim-latest", "x86_64"),
            PathBuf::from("/srv/vim-latest/os/x86_64/vim-latest.db")
        );
    }

    #[test]
    fn test_render_pages() {
        let temp = TempDir::new().unwrap();
        let db_dir = temp.path().join("mirror");
        let out = temp.path().join("public");
        write_db(
            &repository_db_path(&db_dir, "vim-latest", "x86_64"),
            &[("vim-latest", "9.1.0001-1"), ("gvim-latest", "9.1.0001-1")],
        );
        write_db(
            &repository_db_path(&db_dir, "ruby-trunk", "x86_64"),
            &[("ruby-trunk", "20240101-1")],
        );

        let written = render_pages(&config(&["vim-latest", "ruby-trunk"]), &db_dir, &out).unwrap();
        assert_eq!(
            written,
            vec![
                out.join("index.html"),
                out.join("vim-latest/index.html"),
                out.join("ruby-trunk/index.html"),
            ]
        );

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"<a href="vim-latest/">vim-latest</a>"#));
        assert!(index.contains(r#"<a href="ruby-trunk/">ruby-trunk</a>"#));

        let vim = fs::read_to_string(out.join("vim-latest/index.html")).unwrap();
        let gvim_at = vim.find(">gvim-latest<").unwrap();
        let vim_at = vim.find(">vim-latest</a>").unwrap();
        assert!(gvim_at < vim_at);
        assert!(vim.contains("os/x86_64/vim-latest-9.1.0001-1-x86_64.pkg.tar.zst"));
        assert!(vim.contains("2020-09-13T12:26:40+00:00"));
    }

    #[test]
    fn test_render_pages_escapes_html() {
        let temp = TempDir::new().unwrap();
        let db_dir = temp.path().join("mirror");
        write_db(
            &repository_db_path(&db_dir, "r", "x86_64"),
            &[("a<b>", "1-1")],
        );
        render_pages(&config(&["r"]), &db_dir, temp.path()).unwrap();
        let page = fs::read_to_string(temp.path().join("r/index.html")).unwrap();
        assert!(page.contains("a&lt;b&gt;"));
        assert!(!page.contains("<td><a href=\"os/x86_64/a<b>"));
    }

    #[test]
    fn test_render_pages_missing_database() {
        let temp = TempDir::new().unwrap();
        let err = render_pages(&config(&["absent"]), temp.path(), temp.path()).unwrap_err();
        assert!(matches!(err, ArchRepoError::Pages(_)));
    }
}
