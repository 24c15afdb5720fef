//! Plain data types shared by the provisioning phases.
//!
//! Nothing here touches the filesystem; the phases in `services` do.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Normalized CPU architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    X64,
    I386,
    /// Any machine string without a known mapping; the raw value is kept for logs.
    Unsupported(String),
}

impl Architecture {
    /// Map a raw `uname -m` style string. Never fails.
    pub fn from_machine(raw: &str) -> Self {
        match raw.trim() {
            "x86_64" => Architecture::X64,
            "i386" => Architecture::I386,
            other => Architecture::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Architecture::X64 => "x64",
            Architecture::I386 => "i386",
            Architecture::Unsupported(_) => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Architecture::Unsupported(_))
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host fingerprint derived once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub architecture: Architecture,
    pub distribution_id: String,
    pub distribution_release: String,
}

impl PlatformDescriptor {
    pub fn new(
        architecture: Architecture,
        distribution_id: impl Into<String>,
        distribution_release: impl Into<String>,
    ) -> Self {
        Self {
            architecture,
            distribution_id: distribution_id.into(),
            distribution_release: distribution_release.into(),
        }
    }

    /// Version key of the form `linux-<arch>-<distro>-<release>`, lowercase,
    /// with dots in the release replaced by dashes.
    pub fn version_tag(&self) -> String {
        format!(
            "linux-{}-{}-{}",
            self.architecture,
            self.distribution_id,
            self.distribution_release.replace('.', "-")
        )
        .to_lowercase()
    }
}

/// Where an artifact comes from and where its archive lands locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactReference {
    pub url: String,
    pub local_archive_path: PathBuf,
}

/// The single top-level directory produced by extracting an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRoot(PathBuf);

impl PayloadRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for PayloadRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Role of a peer in the integration test topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerRole {
    Client,
    Server,
}

impl PeerRole {
    pub const ALL: [PeerRole; 2] = [PeerRole::Client, PeerRole::Server];

    pub fn dir_name(self) -> &'static str {
        match self {
            PeerRole::Client => "client",
            PeerRole::Server => "server",
        }
    }
}

/// Directory set for one staged peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRoot {
    pub base_path: PathBuf,
    pub cache_path: PathBuf,
    pub client_path: PathBuf,
}

impl PeerRoot {
    /// Compute the peer paths for `tool` under `base`. Does not touch the filesystem.
    pub fn new(base: impl AsRef<Path>, tool: &str) -> Self {
        let base_path = base.as_ref().to_path_buf();
        let cache_path = base_path.join("cache");
        let client_path = base_path.join(format!("{tool}-client"));
        Self { base_path, cache_path, client_path }
    }
}

/// One external source repository to clone and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySource {
    pub repository_url: String,
    pub local_dir_name: String,
}

impl DependencySource {
    /// Build a source whose directory name is the URL's final path segment.
    ///
    /// A trailing `/` and a `.git` suffix are ignored. Returns `None` when the
    /// URL has no usable final segment.
    pub fn from_url(url: &str) -> Option<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let last = trimmed.rsplit(['/', ':']).next()?;
        let name = last.strip_suffix(".git").unwrap_or(last);
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(Self { repository_url: url.trim().to_string(), local_dir_name: name.to_string() })
    }

    /// Path used when registering the clone from inside the project directory.
    pub fn relative_path(&self) -> PathBuf {
        Path::new("..").join(&self.local_dir_name)
    }
}
