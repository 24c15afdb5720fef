use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProvisionError, ProvisionResult};
use crate::model::DependencySource;

/// Artifact pinned when no platform-specific resolution is requested.
pub const DEFAULT_ARTIFACT_URL: &str =
    "http://download.utorrent.com/linux/utorrent-server-3.0-25053.tar.gz";

/// Template used by [`ResolutionPolicy::Platform`]; `{version}` is the version tag.
pub const DEFAULT_URL_TEMPLATE: &str =
    "http://download-new.utorrent.com/os/{version}/track/beta/endpoint/utserver/";

/// Source repositories registered in the build sandbox by default.
pub const DEFAULT_DEPENDENCIES: [&str; 5] = [
    "https://github.com/asians-cloud/tcp-proxy",
    "https://github.com/asians-cloud/shepherd",
    "https://github.com/asians-cloud/helligator",
    "https://github.com/asians-cloud/free-network-protocol",
    "https://github.com/asians-cloud/bittorrent-client-control",
];

/// Overrides the pinned artifact URL.
pub const ENV_ARTIFACT_URL: &str = "HOSTPREP_ARTIFACT_URL";
/// Overrides the version control program.
pub const ENV_VCS_PROGRAM: &str = "HOSTPREP_GIT";
/// Overrides the build sandbox program.
pub const ENV_SANDBOX_PROGRAM: &str = "HOSTPREP_SANDBOX";

/// How the artifact URL is chosen.
///
/// `Pinned` ignores the detected platform entirely. That is the known-good
/// behavior; `Platform` exists so per-distro resolution can be switched on
/// without touching downstream code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    #[default]
    Pinned,
    Platform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// URL used by the pinned policy.
    pub url: String,
    /// File name of the downloaded archive inside the staging dir.
    pub archive_name: String,
    /// Staging dir, relative to the workspace root. Wiped on every run.
    pub staging_dir: String,
    pub resolution: ResolutionPolicy,
    pub url_template: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ARTIFACT_URL.to_string(),
            archive_name: "utserver.tar.gz".to_string(),
            staging_dir: "utserver".to_string(),
            resolution: ResolutionPolicy::Pinned,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Topology root, relative to the workspace root.
    pub root: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self { root: "BitSmuggler/test-data/integration-test".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Main project dir holding the build sandbox, relative to the workspace root.
    pub dir: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self { dir: "BitSmuggler".to_string() }
    }
}

/// External programs driven by the dependency bootstrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramsConfig {
    pub vcs: String,
    pub sandbox: String,
}

impl Default for ProgramsConfig {
    fn default() -> Self {
        Self { vcs: "git".to_string(), sandbox: "cabal".to_string() }
    }
}

/// Serializable provisioning plan.
///
/// Lives at `hostprep.yaml` (or `.yml` / `.json`) in the workspace root.
/// Every field has a default, so an empty file is a valid plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Schema/config version. This is about the config format, not the artifact version.
    pub config_version: String,
    /// Tool name; peers get a `<tool>-client` directory.
    pub tool: String,
    pub artifact: ArtifactConfig,
    pub topology: TopologyConfig,
    pub project: ProjectSection,
    /// Ordered repository URLs cloned next to the project dir.
    pub dependencies: Vec<String>,
    pub programs: ProgramsConfig,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            config_version: "0.1.0".to_string(),
            tool: "utorrent".to_string(),
            artifact: ArtifactConfig::default(),
            topology: TopologyConfig::default(),
            project: ProjectSection::default(),
            dependencies: DEFAULT_DEPENDENCIES.iter().map(|s| s.to_string()).collect(),
            programs: ProgramsConfig::default(),
        }
    }
}

impl PlanConfig {
    /// Dependency records in declared order.
    pub fn dependency_sources(&self) -> ProvisionResult<Vec<DependencySource>> {
        self.dependencies
            .iter()
            .map(|url| {
                DependencySource::from_url(url).ok_or_else(|| ProvisionError::Config {
                    path: Path::new("dependencies").to_path_buf(),
                    message: format!("cannot derive a directory name from '{url}'"),
                })
            })
            .collect()
    }

    /// Apply `HOSTPREP_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(ENV_ARTIFACT_URL) {
            self.artifact.url = url;
        }
        if let Some(vcs) = get(ENV_VCS_PROGRAM) {
            self.programs.vcs = vcs;
        }
        if let Some(sandbox) = get(ENV_SANDBOX_PROGRAM) {
            self.programs.sandbox = sandbox;
        }
    }

    /// Parse a plan from a file, choosing JSON or YAML by extension.
    pub fn from_file(path: &Path) -> ProvisionResult<Self> {
        let body = std::fs::read_to_string(path).map_err(|e| ProvisionError::fs(path, e))?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let parsed = if is_json {
            serde_json::from_str(&body).map_err(|e| e.to_string())
        } else if body.trim().is_empty() {
            Ok(PlanConfig::default())
        } else {
            serde_yaml::from_str(&body).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ProvisionError::Config { path: path.to_path_buf(), message })
    }

    /// Serialize for writing back to `path`, matching its extension.
    pub fn to_string_for(&self, path: &Path) -> ProvisionResult<String> {
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let rendered = if is_json {
            serde_json::to_string_pretty(self).map_err(|e| e.to_string())
        } else {
            serde_yaml::to_string(self).map_err(|e| e.to_string())
        };
        rendered.map_err(|message| ProvisionError::Config { path: path.to_path_buf(), message })
    }
}
