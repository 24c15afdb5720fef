use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use hostprep_core::backends::{CabalSandbox, GitCloner, HttpFetcher, TarGzExtractor};
use hostprep_core::services::pipeline::Capabilities;
use hostprep_core::workspace::{ensure_current_workspace, PlanConfig, WorkspaceContext};

use crate::canonicalize_or_current;

/// Resolve `root` and load its plan (or defaults) into a context.
pub fn load_context(root: &str) -> Result<WorkspaceContext> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = WorkspaceContext::from_root(&root_path)?;
    match &ctx.plan_path {
        Some(path) => debug!(plan = %path.display(), "loaded plan config"),
        None => debug!(root = %root_path.display(), "no plan file, using defaults"),
    }
    Ok(ctx)
}

/// Abort unless the process runs from the root of a marked workspace.
///
/// Called before any command that writes to disk.
pub fn require_workspace_cwd(ctx: &WorkspaceContext) -> Result<()> {
    ensure_current_workspace(ctx).context("Refusing to provision outside the workspace root")?;
    Ok(())
}

/// Owned set of the real capability implementations.
pub struct DefaultCapabilities {
    pub fetcher: HttpFetcher,
    pub extractor: TarGzExtractor,
    pub cloner: GitCloner,
    pub sandbox: CabalSandbox,
}

impl DefaultCapabilities {
    pub fn for_plan(plan: &PlanConfig) -> Result<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new().context("Failed to initialize HTTP client")?,
            extractor: TarGzExtractor,
            cloner: GitCloner::new(&plan.programs.vcs),
            sandbox: CabalSandbox::new(&plan.programs.sandbox),
        })
    }

    pub fn borrow(&self) -> Capabilities<'_> {
        Capabilities {
            fetcher: &self.fetcher,
            extractor: &self.extractor,
            cloner: &self.cloner,
            sandbox: &self.sandbox,
        }
    }
}

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}
