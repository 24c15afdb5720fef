//! Workspace configuration and layout.
//!
//! A workspace is the directory the orchestrator runs from. It holds:
//! - An optional plan file (`hostprep.yaml` / `.yml` / `.json`).
//! - The artifact staging directory.
//! - The main project directory, its build sandbox, and the integration
//!   test topology beneath it.
//!
//! This module defines:
//! - `PlanConfig`: serializable provisioning plan with built-in defaults.
//! - `WorkspaceLayout`: computed paths for everything a run touches.
//! - `WorkspaceContext`: plan + layout loaded for a root.
//! - `ensure_workspace`: workspace marker and working-directory precondition.

use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, ProvisionResult};

pub mod config;
pub mod context;
pub mod layout;
pub mod util;

pub use config::*;
pub use context::*;
pub use layout::*;
pub use util::*;

/// Fail unless `cwd` and `root` name the same directory.
///
/// Relative paths in the plan are resolved against the root; running from
/// anywhere else would scatter state across the wrong tree.
pub fn ensure_run_from(root: &Path, cwd: &Path) -> ProvisionResult<()> {
    let canon = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    let expected = canon(root);
    let actual = canon(cwd);
    if expected == actual {
        Ok(())
    } else {
        Err(ProvisionError::Precondition { expected, actual })
    }
}

/// Fail unless `ctx` describes a recognizable workspace and `cwd` is its root.
///
/// A workspace is marked by a plan file or an existing project directory.
/// Without either, the root is some unrelated directory and nothing may be
/// wiped or cloned there.
pub fn ensure_workspace(ctx: &WorkspaceContext, cwd: &Path) -> ProvisionResult<()> {
    ensure_run_from(&ctx.layout.root, cwd)?;
    if ctx.plan_path.is_none() && !ctx.layout.project_dir.is_dir() {
        return Err(ProvisionError::NotAWorkspace {
            root: ctx.layout.root.clone(),
            project_dir: ctx.layout.project_dir.clone(),
        });
    }
    Ok(())
}

/// Check the process working directory against the workspace in `ctx`.
pub fn ensure_current_workspace(ctx: &WorkspaceContext) -> ProvisionResult<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| ProvisionError::fs(".", e))?;
    ensure_workspace(ctx, &cwd)?;
    Ok(cwd)
}
