use std::fs;
use std::path::Path;

use tracing::info;

use crate::backends::{BuildSandbox, SourceCloner};
use crate::error::{ProvisionError, ProvisionResult};
use crate::model::DependencySource;

/// Clones dependency sources next to a project and registers them in its sandbox.
pub struct DependencyBootstrapper<'a> {
    pub cloner: &'a dyn SourceCloner,
    pub sandbox: &'a dyn BuildSandbox,
}

impl<'a> DependencyBootstrapper<'a> {
    pub fn new(cloner: &'a dyn SourceCloner, sandbox: &'a dyn BuildSandbox) -> Self {
        Self { cloner, sandbox }
    }

    /// Clone every source into `clone_root/<local_dir_name>` in order, then
    /// init the sandbox in `project_dir` and add each clone by relative path.
    ///
    /// All-or-nothing up to the first failure: a failed clone stops the run
    /// before the sandbox is touched.
    pub fn bootstrap(
        &self,
        clone_root: &Path,
        project_dir: &Path,
        sources: &[DependencySource],
    ) -> ProvisionResult<()> {
        fs::create_dir_all(clone_root).map_err(|e| ProvisionError::fs(clone_root, e))?;
        for source in sources {
            let dest = clone_root.join(&source.local_dir_name);
            self.cloner.clone_repo(&source.repository_url, &dest)?;
        }

        if !project_dir.is_dir() {
            return Err(ProvisionError::fs(
                project_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "project directory is missing"),
            ));
        }

        info!(dir = %project_dir.display(), "creating a build sandbox");
        self.sandbox.init(project_dir)?;

        info!(count = sources.len(), "adding sources to the sandbox");
        for source in sources {
            self.sandbox.add_source(project_dir, &source.relative_path())?;
        }
        Ok(())
    }
}
