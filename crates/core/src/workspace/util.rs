use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::workspace::{PlanConfig, PLAN_FILE_NAMES};

/// First existing plan file in `root`, if any.
pub fn find_plan_file(root: &Path) -> Option<PathBuf> {
    PLAN_FILE_NAMES.iter().map(|name| root.join(name)).find(|p| p.is_file())
}

/// Default location for a freshly written plan.
pub fn default_plan_path(root: &Path, json: bool) -> PathBuf {
    root.join(if json { PLAN_FILE_NAMES[2] } else { PLAN_FILE_NAMES[0] })
}

/// Load the plan for `root`, falling back to defaults when no file exists.
///
/// Environment overrides are applied on top in both cases.
pub fn load_plan(root: &Path) -> Result<(PlanConfig, Option<PathBuf>)> {
    let path = find_plan_file(root);
    let mut plan = match &path {
        Some(p) => PlanConfig::from_file(p)
            .with_context(|| format!("Failed to load plan config at {}", p.display()))?,
        None => PlanConfig::default(),
    };
    plan.apply_env_overrides();
    Ok((plan, path))
}
