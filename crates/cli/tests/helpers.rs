use std::fs;

use hostprep::{canonicalize_or_current, init_tracing};
use tempfile::tempdir;

// Both cwd-dependent cases live in one test so they never race over the
// process-wide current directory.
#[test]
fn canonicalize_or_current_resolves_relative_to_cwd() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let dot = canonicalize_or_current(".").expect("dot").canonicalize().expect("canon");
    let nested = canonicalize_or_current("nested").expect("nested");
    let missing = canonicalize_or_current("not-yet").expect("missing");

    std::env::set_current_dir(original).expect("restore cwd");

    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(dot, expected);
    assert_eq!(nested, subdir.canonicalize().expect("canonicalize subdir"));
    assert!(missing.ends_with("not-yet"));
    assert!(missing.is_absolute());
}

#[test]
fn canonicalize_or_current_keeps_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let abs = tmp.path().to_string_lossy().to_string();
    let result = canonicalize_or_current(&abs).expect("canonicalize");
    assert_eq!(result, tmp.path().canonicalize().unwrap());
}

#[test]
fn init_tracing_installs_once() {
    init_tracing(2).expect("first install");
    assert!(init_tracing(0).is_err(), "a second global subscriber is rejected");
}
