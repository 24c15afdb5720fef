//! External capability adapters.
//!
//! The orchestrator never speaks HTTP, decodes archives, or drives version
//! control itself. It goes through these narrow traits so tests can swap in
//! fakes:
//! - `Fetcher`: download a URL to a file (`HttpFetcher`).
//! - `Extractor`: unpack an archive into a directory (`TarGzExtractor`).
//! - `SourceCloner`: clone a repository (`GitCloner`).
//! - `BuildSandbox`: init a sandbox and register local sources (`CabalSandbox`).

use std::path::Path;
use std::process::Command;

use crate::error::ProvisionResult;

pub mod cabal;
pub mod git;
pub mod http;
pub mod tarball;

pub use cabal::CabalSandbox;
pub use git::GitCloner;
pub use http::HttpFetcher;
pub use tarball::TarGzExtractor;

/// Download `url` into the file at `dest`.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> ProvisionResult<()>;
}

/// Unpack the archive at `archive` into the existing directory `dest_dir`.
pub trait Extractor {
    fn extract(&self, archive: &Path, dest_dir: &Path) -> ProvisionResult<()>;
}

/// Clone the repository at `url` into `dest_dir`, which must not exist yet.
pub trait SourceCloner {
    fn clone_repo(&self, url: &str, dest_dir: &Path) -> ProvisionResult<()>;
}

/// Build sandbox living inside a project directory.
pub trait BuildSandbox {
    /// Initialize the sandbox. Re-initializing an existing one must succeed.
    fn init(&self, project_dir: &Path) -> ProvisionResult<()>;

    /// Register a local source, given relative to `project_dir`.
    fn add_source(&self, project_dir: &Path, source: &Path) -> ProvisionResult<()>;
}

/// Run an external program to completion, returning a failure message on error.
///
/// The working directory is always passed explicitly; the orchestrator's own
/// current directory is never changed.
pub(crate) fn run_program(mut cmd: Command) -> Result<(), String> {
    let output = cmd.output().map_err(|e| format!("failed to spawn: {e}"))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        Err(format!("exited with {}", output.status))
    } else {
        Err(format!("exited with {}: {}", output.status, stderr))
    }
}

/// Render a command line for messages.
pub(crate) fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ")
}
