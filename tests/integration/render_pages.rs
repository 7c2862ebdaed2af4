//! Tests for `archrepo render-pages`

use super::common::{write_repository_db, TestContext};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_render_pages_from_local_databases() {
    let ctx = TestContext::new();
    ctx.write("archrepo.yaml", "pages:\n  repositories: [vim-latest]\n");
    let mirror = ctx.root().join("mirror");
    write_repository_db(
        &mirror.join("vim-latest/os/x86_64/vim-latest.db"),
        &[("vim-latest", "9.1.0001-1", 1_700_000_000)],
    );
    let out = ctx.root().join("public");

    ctx.archrepo()
        .arg("render-pages")
        .arg(&mirror)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html"));

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("vim-latest/"));
    let page = fs::read_to_string(out.join("vim-latest/index.html")).unwrap();
    assert!(page.contains("9.1.0001-1"));
    assert!(page.contains("2023-11-14T22:13:20+00:00"));
}

#[test]
fn test_render_pages_missing_database() {
    let ctx = TestContext::new();
    ctx.write("archrepo.yaml", "pages:\n  repositories: [ruby-trunk]\n");

    ctx.archrepo()
        .arg("render-pages")
        .arg(ctx.root().join("mirror"))
        .arg(ctx.root().join("public"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ruby-trunk.db"));
}
