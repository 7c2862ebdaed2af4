//! Argument handling and exit codes

use super::common::TestContext;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let ctx = TestContext::new();
    ctx.archrepo()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("update-dropbox")
                .and(predicate::str::contains("update-ruby-trunk"))
                .and(predicate::str::contains("update-vim-latest"))
                .and(predicate::str::contains("commit-update"))
                .and(predicate::str::contains("submodule-diff"))
                .and(predicate::str::contains("render-pages")),
        );
}

#[test]
fn test_update_dropbox_without_version_exits_1() {
    let ctx = TestContext::new();
    ctx.archrepo()
        .arg("update-dropbox")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing argument: VERSION"));

    assert!(!ctx.root().join("aur-eagletmt").exists());
}

#[test]
fn test_invalid_config_file() {
    let ctx = TestContext::new();
    ctx.write("archrepo.yaml", "github: [not, a, mapping\n");
    ctx.archrepo()
        .args(["update-dropbox", "1.0.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error").and(predicate::str::contains("help:")));
}

#[test]
fn test_missing_explicit_config() {
    let ctx = TestContext::new();
    ctx.archrepo()
        .arg("--config")
        .arg(ctx.root().join("absent.yaml"))
        .arg("update-vim-latest")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_usage_errors_exit_1() {
    let ctx = TestContext::new();
    ctx.archrepo()
        .arg("update-everything")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized subcommand"));

    ctx.archrepo()
        .args(["commit-update", "--no-such-flag"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-such-flag"));

    ctx.archrepo()
        .args(["render-pages", "db"])
        .assert()
        .code(1);
}

#[test]
fn test_version_exits_0() {
    let ctx = TestContext::new();
    ctx.archrepo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("archrepo"));
}
