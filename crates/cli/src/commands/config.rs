use std::fs;

use anyhow::{anyhow, Context, Result};

use hostprep_core::workspace::{default_plan_path, find_plan_file, PlanConfig, WorkspaceLayout};

use crate::canonicalize_or_current;
use crate::commands::{load_context, print_dir_status};

/// Write the default plan file into the workspace root.
pub fn init_config_command(root: &str, json: bool, force: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    fs::create_dir_all(&root_path)
        .with_context(|| format!("Failed to create workspace root: {}", root_path.display()))?;

    if let Some(existing) = find_plan_file(&root_path) {
        if !force {
            return Err(anyhow!(
                "Plan config already exists at {} (use --force to overwrite)",
                existing.display()
            ));
        }
    }

    let path = default_plan_path(&root_path, json);
    let plan = PlanConfig::default();
    let body = plan.to_string_for(&path)?;
    fs::write(&path, body)
        .with_context(|| format!("Failed to write plan config: {}", path.display()))?;

    let layout = WorkspaceLayout::new(&root_path, &plan);
    println!("Initialized hostprep workspace:");
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", path.display());
    println!("  Staging dir: {}", layout.staging_dir.display());
    println!("  Topology root: {}", layout.topology_root.display());
    println!("  Project dir: {}", layout.project_dir.display());
    Ok(())
}

/// Print the effective plan (file + environment overrides) and layout status.
pub fn show_config_command(root: &str, json: bool) -> Result<()> {
    let ctx = load_context(root)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ctx.plan).context("Failed to serialize plan config")?
        );
        return Ok(());
    }

    let plan = &ctx.plan;
    let layout = &ctx.layout;
    println!("hostprep Workspace");
    println!("==================");
    println!("Root: {}", layout.root.display());
    match &ctx.plan_path {
        Some(p) => println!("Config file: {}", p.display()),
        None => println!("Config file: (none, using defaults)"),
    }
    println!("Config version: {}", plan.config_version);
    println!("Tool: {}", plan.tool);
    println!("Artifact URL: {}", plan.artifact.url);
    println!("Resolution: {:?}", plan.artifact.resolution);
    println!("Dependencies ({}):", plan.dependencies.len());
    for dep in &plan.dependencies {
        println!("  - {dep}");
    }
    println!("Programs: vcs={} sandbox={}", plan.programs.vcs, plan.programs.sandbox);
    println!();

    println!("Directories:");
    print_dir_status("Staging dir", &layout.staging_dir);
    print_dir_status("Topology root", &layout.topology_root);
    print_dir_status("Project dir", &layout.project_dir);
    Ok(())
}
