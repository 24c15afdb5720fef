#![cfg(unix)]

mod support;

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use support::{tarball_url, write_script, write_small_plan, PAYLOAD};
use tempfile::tempdir;

/// Full run with stub git/sandbox programs: the clone lands next to the
/// project and is registered by relative path from inside it.
#[test]
fn run_bootstraps_with_configured_programs() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_small_plan(root);
    fs::create_dir_all(root.join("BitSmuggler")).unwrap();
    let url = tarball_url(&root.join("fixture.tar.gz"), &PAYLOAD);

    let tools = tempdir().expect("tools dir");
    let git = tools.path().join("fake-git");
    let sandbox = tools.path().join("fake-cabal");
    let log = tools.path().join("sandbox.log");
    // `git clone <url> <dest>`
    write_script(&git, "mkdir -p \"$3\" && echo \"$2\" > \"$3/ORIGIN\"");
    write_script(&sandbox, &format!("echo \"$(pwd) $*\" >> \"{}\"", log.display()));

    cargo_bin_cmd!("hostprep")
        .current_dir(root)
        .env("HOSTPREP_ARTIFACT_URL", &url)
        .env("HOSTPREP_GIT", &git)
        .env("HOSTPREP_SANDBOX", &sandbox)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("tcp-proxy"));

    assert_eq!(
        fs::read_to_string(root.join("tcp-proxy/ORIGIN")).unwrap().trim(),
        "https://example.invalid/asians-cloud/tcp-proxy"
    );

    let lines: Vec<String> =
        fs::read_to_string(&log).unwrap().lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("BitSmuggler sandbox init"), "got {}", lines[0]);
    assert!(lines[1].ends_with("BitSmuggler sandbox add-source ../tcp-proxy"), "got {}", lines[1]);
}

/// A failing clone aborts the bootstrap before the sandbox is initialized.
#[test]
fn bootstrap_fails_when_clone_fails() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_small_plan(root);
    fs::create_dir_all(root.join("BitSmuggler")).unwrap();

    let tools = tempdir().expect("tools dir");
    let git = tools.path().join("failing-git");
    let sandbox = tools.path().join("fake-cabal");
    let log = tools.path().join("sandbox.log");
    write_script(&git, "echo 'fatal: repository not found' >&2; exit 128");
    write_script(&sandbox, &format!("echo \"$*\" >> \"{}\"", log.display()));

    cargo_bin_cmd!("hostprep")
        .current_dir(root)
        .env("HOSTPREP_GIT", &git)
        .env("HOSTPREP_SANDBOX", &sandbox)
        .arg("bootstrap")
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository not found"));

    assert!(!log.exists(), "sandbox must not run after a failed clone");
}
