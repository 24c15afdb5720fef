use std::path::PathBuf;

use thiserror::Error;

/// Error type for every fatal provisioning failure.
///
/// Malformed release metadata is deliberately absent: platform detection
/// degrades instead of failing.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The process was started somewhere other than the workspace root.
    #[error("Must be run from the workspace root {expected} (current directory is {actual})")]
    Precondition { expected: PathBuf, actual: PathBuf },

    /// The workspace root holds neither a plan file nor the project directory.
    #[error(
        "{root} is not a hostprep workspace: no plan file and no project directory \
         {project_dir} (run `hostprep init-config` there first)"
    )]
    NotAWorkspace { root: PathBuf, project_dir: PathBuf },

    /// Download failed or returned a non-success status.
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// The archive could not be read or unpacked.
    #[error("Failed to extract {archive}: {message}")]
    Decode { archive: PathBuf, message: String },

    /// Extraction succeeded but produced no top-level directory.
    #[error("Archive produced no payload directory in {0}")]
    EmptyArchive(PathBuf),

    /// Staging source does not exist.
    #[error("Payload not found at {0}")]
    MissingPayload(PathBuf),

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Version control client failed for one dependency.
    #[error("Failed to clone {url} into {dest}: {message}")]
    Clone { url: String, dest: PathBuf, message: String },

    /// Build sandbox tool failed.
    #[error("Build sandbox command `{command}` failed in {dir}: {message}")]
    Sandbox { command: String, dir: PathBuf, message: String },

    /// Plan file could not be read or parsed.
    #[error("Invalid plan config at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ProvisionError {
    /// Wrap an IO error with the path it happened at.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem { path: path.into(), source }
    }
}

/// Convenience result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
