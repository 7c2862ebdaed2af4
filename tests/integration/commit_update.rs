//! Tests for `archrepo commit-update` and `archrepo submodule-diff`

use super::common::TestContext;
use git2::{Repository, Signature};
use predicates::prelude::*;
use std::path::Path;

/// Repository at the test root with a committer identity for `git commit`
fn init_repository(ctx: &TestContext) -> Repository {
    let repo = Repository::init(ctx.root()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Packager").unwrap();
        config.set_str("user.email", "packager@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();
    }
    repo
}

fn stage(repo: &Repository, rel: &str) {
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
}

fn commit_index(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Packager", "packager@example.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap();
}

fn head_message(repo: &Repository) -> String {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    head.message().unwrap().trim_end().to_string()
}

#[test]
fn test_commit_update_commits_version_bump() {
    if which::which("git").is_err() {
        return;
    }
    let ctx = TestContext::new();
    let repo = init_repository(&ctx);
    ctx.write("foo/PKGBUILD", "pkgname=foo\npkgver=1\npkgrel=1\n");
    stage(&repo, "foo/PKGBUILD");
    commit_index(&repo, "Add foo 1-1");

    ctx.write("foo/PKGBUILD", "pkgname=foo\npkgver=2\npkgrel=1\n");
    stage(&repo, "foo/PKGBUILD");

    ctx.archrepo().arg("commit-update").assert().success();

    assert_eq!(head_message(&repo), "Update foo 1-1 -> 2-1");
    let statuses = repo.statuses(None).unwrap();
    assert!(statuses.is_empty());
}

#[test]
fn test_commit_update_commits_new_package() {
    if which::which("git").is_err() {
        return;
    }
    let ctx = TestContext::new();
    let repo = init_repository(&ctx);
    ctx.write("README", "packages\n");
    stage(&repo, "README");
    commit_index(&repo, "initial");

    ctx.write("bar/PKGBUILD", "pkgname=bar\npkgver=0.1\npkgrel=1\n");
    stage(&repo, "bar/PKGBUILD");

    ctx.archrepo().arg("commit-update").assert().success();

    assert_eq!(head_message(&repo), "Add bar 0.1-1");
}

#[test]
fn test_commit_update_refuses_conditional_version() {
    let ctx = TestContext::new();
    let repo = init_repository(&ctx);
    ctx.write(
        "foo/PKGBUILD",
        "pkgver=1.0\nif false; then\n  pkgver=2.0\nfi\npkgrel=1\n",
    );
    stage(&repo, "foo/PKGBUILD");

    ctx.archrepo()
        .arg("commit-update")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--shell"));
    assert!(repo.head().is_err());
}

#[test]
fn test_commit_update_with_nothing_staged() {
    let ctx = TestContext::new();
    Repository::init(ctx.root()).unwrap();

    ctx.archrepo()
        .arg("commit-update")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No PKGBUILD is modified"));
}

#[test]
fn test_commit_update_with_two_staged_pkgbuilds() {
    let ctx = TestContext::new();
    let repo = init_repository(&ctx);
    ctx.write("foo/PKGBUILD", "pkgver=1\npkgrel=1\n");
    ctx.write("bar/PKGBUILD", "pkgver=2\npkgrel=1\n");
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("foo/PKGBUILD")).unwrap();
    index.add_path(Path::new("bar/PKGBUILD")).unwrap();
    index.write().unwrap();

    ctx.archrepo()
        .arg("commit-update")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Multiple PKGBUILDs are modified"));
}

#[test]
fn test_commit_update_outside_repository() {
    let ctx = TestContext::new();
    ctx.archrepo()
        .arg("commit-update")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_submodule_diff_without_submodules() {
    let ctx = TestContext::new();
    Repository::init(ctx.root()).unwrap();

    ctx.archrepo().arg("submodule-diff").assert().success();
}
