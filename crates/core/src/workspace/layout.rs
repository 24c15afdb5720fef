use std::path::{Path, PathBuf};

use crate::model::{PeerRole, PeerRoot};
use crate::workspace::PlanConfig;

/// Plan file names looked up in the workspace root, in priority order.
pub const PLAN_FILE_NAMES: [&str; 3] = ["hostprep.yaml", "hostprep.yml", "hostprep.json"];

/// Logical layout of a provisioning workspace on disk.
///
/// This is derived from a chosen root path and a plan. It does *not* perform
/// any IO itself; the services create what they need.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    /// Root directory of the workspace.
    pub root: PathBuf,
    /// Artifact staging directory (wiped on every provision).
    pub staging_dir: PathBuf,
    /// Downloaded archive path inside the staging directory.
    pub archive_path: PathBuf,
    /// Extraction target inside the staging directory.
    pub unarchived_dir: PathBuf,
    /// Integration test topology root.
    pub topology_root: PathBuf,
    /// Main project directory holding the build sandbox.
    pub project_dir: PathBuf,
    /// Parent of the project directory; dependencies are cloned here.
    pub dependencies_dir: PathBuf,
}

impl WorkspaceLayout {
    /// Compute the layout for a workspace rooted at `root` under `plan`.
    pub fn new(root: impl AsRef<Path>, plan: &PlanConfig) -> Self {
        let root = root.as_ref().to_path_buf();
        let staging_dir = root.join(&plan.artifact.staging_dir);
        let archive_path = staging_dir.join(&plan.artifact.archive_name);
        let unarchived_dir = staging_dir.join("unarchived");
        let topology_root = root.join(&plan.topology.root);
        let project_dir = root.join(&plan.project.dir);
        let dependencies_dir =
            project_dir.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone());

        Self {
            root,
            staging_dir,
            archive_path,
            unarchived_dir,
            topology_root,
            project_dir,
            dependencies_dir,
        }
    }

    /// Base directory for one peer role under the topology root.
    pub fn peer_dir(&self, role: PeerRole) -> PathBuf {
        self.topology_root.join(role.dir_name())
    }

    /// Full peer paths for one role.
    pub fn peer_root(&self, role: PeerRole, tool: &str) -> PeerRoot {
        PeerRoot::new(self.peer_dir(role), tool)
    }
}
