use std::collections::HashMap;
use std::fs;

use hostprep_core::model::{Architecture, PeerRole, PlatformDescriptor};
use hostprep_core::services::resolver::{resolver_for, ArtifactResolver, PinnedResolver};
use hostprep_core::workspace::{
    ensure_run_from, ensure_workspace, find_plan_file, load_plan, PlanConfig, ResolutionPolicy,
    WorkspaceContext, WorkspaceLayout, DEFAULT_ARTIFACT_URL, DEFAULT_DEPENDENCIES, ENV_ARTIFACT_URL,
    ENV_SANDBOX_PROGRAM,
};
use hostprep_core::ProvisionError;
use tempfile::tempdir;

#[test]
fn default_plan_matches_builtin_constants() {
    let plan = PlanConfig::default();
    assert_eq!(plan.tool, "utorrent");
    assert_eq!(plan.artifact.url, DEFAULT_ARTIFACT_URL);
    assert_eq!(plan.artifact.resolution, ResolutionPolicy::Pinned);
    assert_eq!(plan.dependencies.len(), DEFAULT_DEPENDENCIES.len());

    let names: Vec<_> =
        plan.dependency_sources().unwrap().into_iter().map(|s| s.local_dir_name).collect();
    assert_eq!(
        names,
        vec![
            "tcp-proxy",
            "shepherd",
            "helligator",
            "free-network-protocol",
            "bittorrent-client-control"
        ]
    );
}

#[test]
fn layout_places_dependencies_next_to_project() {
    let plan = PlanConfig::default();
    let layout = WorkspaceLayout::new("/work", &plan);
    assert_eq!(layout.staging_dir, std::path::Path::new("/work/utserver"));
    assert_eq!(layout.archive_path, std::path::Path::new("/work/utserver/utserver.tar.gz"));
    assert_eq!(layout.unarchived_dir, std::path::Path::new("/work/utserver/unarchived"));
    assert_eq!(
        layout.topology_root,
        std::path::Path::new("/work/BitSmuggler/test-data/integration-test")
    );
    assert_eq!(layout.project_dir, std::path::Path::new("/work/BitSmuggler"));
    assert_eq!(layout.dependencies_dir, std::path::Path::new("/work"));

    let server = layout.peer_root(PeerRole::Server, &plan.tool);
    assert_eq!(
        server.client_path,
        std::path::Path::new("/work/BitSmuggler/test-data/integration-test/server/utorrent-client")
    );
}

#[test]
fn yaml_plan_overrides_only_given_fields() {
    let tmp = tempdir().expect("tempdir");
    fs::write(
        tmp.path().join("hostprep.yaml"),
        "tool: transmission\nartifact:\n  resolution: platform\ndependencies:\n  - https://example.com/x/dep-one\n",
    )
    .unwrap();

    let path = find_plan_file(tmp.path()).expect("plan file");
    let plan = PlanConfig::from_file(&path).expect("parse");
    assert_eq!(plan.tool, "transmission");
    assert_eq!(plan.artifact.resolution, ResolutionPolicy::Platform);
    assert_eq!(plan.artifact.archive_name, "utserver.tar.gz");
    assert_eq!(plan.dependencies, vec!["https://example.com/x/dep-one"]);
    assert_eq!(plan.programs.vcs, "git");
}

#[test]
fn json_plan_round_trips_through_writer() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("hostprep.json");
    let mut plan = PlanConfig::default();
    plan.project.dir = "Other".into();
    fs::write(&path, plan.to_string_for(&path).unwrap()).unwrap();
    assert!(fs::read_to_string(&path).unwrap().trim_start().starts_with('{'));

    let parsed = PlanConfig::from_file(&path).expect("parse");
    assert_eq!(parsed, plan);
}

#[test]
fn invalid_plan_is_a_config_error() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("hostprep.yaml");
    fs::write(&path, "dependencies: [unterminated\n").unwrap();
    let err = PlanConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ProvisionError::Config { .. }), "got {err}");
}

#[test]
fn missing_plan_file_falls_back_to_defaults() {
    let tmp = tempdir().expect("tempdir");
    let (plan, path) = load_plan(tmp.path()).expect("load");
    assert!(path.is_none());
    assert_eq!(plan.tool, "utorrent");
}

#[test]
fn overrides_replace_urls_and_programs() {
    let env: HashMap<&str, &str> = [
        (ENV_ARTIFACT_URL, "file:///tmp/utserver.tar.gz"),
        (ENV_SANDBOX_PROGRAM, "  "),
    ]
    .into_iter()
    .collect();
    let mut plan = PlanConfig::default();
    plan.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
    assert_eq!(plan.artifact.url, "file:///tmp/utserver.tar.gz");
    assert_eq!(plan.programs.sandbox, "cabal", "blank override is ignored");
}

#[test]
fn pinned_resolver_ignores_platform() {
    let resolver = PinnedResolver::new("http://pinned/artifact.tgz");
    let a = PlatformDescriptor::new(Architecture::X64, "Ubuntu", "14.04");
    let b = PlatformDescriptor::new(Architecture::Unsupported("arm".into()), "", "");
    assert_eq!(resolver.resolve(&a), "http://pinned/artifact.tgz");
    assert_eq!(resolver.resolve(&b), "http://pinned/artifact.tgz");
    assert_eq!(resolver_for(&PlanConfig::default().artifact).name(), "pinned");
}

#[test]
fn run_from_check_compares_canonical_paths() {
    let tmp = tempdir().expect("tempdir");
    let other = tmp.path().join("elsewhere");
    fs::create_dir_all(&other).unwrap();

    ensure_run_from(tmp.path(), &tmp.path().join("elsewhere").join("..")).expect("same dir");
    let err = ensure_run_from(tmp.path(), &other).unwrap_err();
    assert!(matches!(err, ProvisionError::Precondition { .. }), "got {err}");
}

#[test]
fn workspace_requires_plan_file_or_project_dir() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();

    let bare = WorkspaceContext::from_root(root).expect("context");
    let err = ensure_workspace(&bare, root).unwrap_err();
    assert!(matches!(err, ProvisionError::NotAWorkspace { .. }), "got {err}");

    fs::create_dir_all(root.join("BitSmuggler")).unwrap();
    let with_project = WorkspaceContext::from_root(root).expect("context");
    ensure_workspace(&with_project, root).expect("project dir marks the workspace");

    fs::remove_dir_all(root.join("BitSmuggler")).unwrap();
    fs::write(root.join("hostprep.yaml"), "tool: utorrent\n").unwrap();
    let with_plan = WorkspaceContext::from_root(root).expect("context");
    ensure_workspace(&with_plan, root).expect("plan file marks the workspace");

    let elsewhere = root.join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();
    let err = ensure_workspace(&with_plan, &elsewhere).unwrap_err();
    assert!(matches!(err, ProvisionError::Precondition { .. }), "got {err}");
}
