use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::backends::{describe, run_program, BuildSandbox};
use crate::error::{ProvisionError, ProvisionResult};

/// Build sandbox driven through `cabal sandbox`.
pub struct CabalSandbox {
    program: String,
}

impl CabalSandbox {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn run(&self, project_dir: &Path, args: &[&str]) -> ProvisionResult<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(project_dir);
        run_program(cmd).map_err(|message| ProvisionError::Sandbox {
            command: describe(&self.program, args),
            dir: project_dir.to_path_buf(),
            message,
        })
    }
}

impl Default for CabalSandbox {
    fn default() -> Self {
        Self::new("cabal")
    }
}

impl BuildSandbox for CabalSandbox {
    fn init(&self, project_dir: &Path) -> ProvisionResult<()> {
        info!(dir = %project_dir.display(), "initializing build sandbox");
        self.run(project_dir, &["sandbox", "init"])
    }

    fn add_source(&self, project_dir: &Path, source: &Path) -> ProvisionResult<()> {
        let source = source.to_string_lossy();
        info!(dir = %project_dir.display(), %source, "registering sandbox source");
        self.run(project_dir, &["sandbox", "add-source", source.as_ref()])
    }
}
