use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::backends::{run_program, SourceCloner};
use crate::error::{ProvisionError, ProvisionResult};

/// Cloner that shells out to a `git` executable.
pub struct GitCloner {
    program: String,
}

impl GitCloner {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl SourceCloner for GitCloner {
    fn clone_repo(&self, url: &str, dest_dir: &Path) -> ProvisionResult<()> {
        info!(%url, dest = %dest_dir.display(), "cloning dependency");
        let mut cmd = Command::new(&self.program);
        cmd.arg("clone").arg(url).arg(dest_dir);
        // Fail instead of blocking on a credential prompt.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        run_program(cmd).map_err(|message| ProvisionError::Clone {
            url: url.to_string(),
            dest: dest_dir.to_path_buf(),
            message,
        })
    }
}
