use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::workspace::{load_plan, PlanConfig, WorkspaceLayout};

/// Convenience wrapper bundling the plan, where it came from, and the layout it implies.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    pub plan: PlanConfig,
    pub plan_path: Option<PathBuf>,
    pub layout: WorkspaceLayout,
}

impl WorkspaceContext {
    /// Load the plan (or defaults) and compute the layout for a given root.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let (plan, plan_path) = load_plan(root)?;
        let layout = WorkspaceLayout::new(root, &plan);
        Ok(Self { plan, plan_path, layout })
    }

    /// Build a context from an already constructed plan.
    pub fn with_plan(root: impl AsRef<Path>, plan: PlanConfig) -> Self {
        let layout = WorkspaceLayout::new(root, &plan);
        Self { plan, plan_path: None, layout }
    }
}
