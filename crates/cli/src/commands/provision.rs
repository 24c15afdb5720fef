use anyhow::{Context, Result};

use hostprep_core::platform;
use hostprep_core::services::pipeline::Pipeline;

use crate::commands::{load_context, require_workspace_cwd, DefaultCapabilities};

/// Download the artifact and stage both peers, without touching dependencies.
pub fn provision_command(root: &str) -> Result<()> {
    let ctx = load_context(root)?;
    require_workspace_cwd(&ctx)?;

    let caps = DefaultCapabilities::for_plan(&ctx.plan)?;
    let staged = Pipeline::new(&ctx, caps.borrow())
        .provision_and_stage(&platform::detect())
        .context("Artifact provisioning failed")?;

    println!("Staged artifact:");
    println!("  Source: {}", staged.url);
    println!("  Payload: {}", staged.payload.path().display());
    for peer in &staged.peers {
        println!("  Peer {:?}:", peer.role);
        println!("    Cache: {}", peer.root.cache_path.display());
        println!("    Client: {}", peer.root.client_path.display());
    }
    Ok(())
}

/// Clone dependencies and register them in the project's build sandbox.
pub fn bootstrap_command(root: &str) -> Result<()> {
    let ctx = load_context(root)?;
    require_workspace_cwd(&ctx)?;

    let caps = DefaultCapabilities::for_plan(&ctx.plan)?;
    let names = Pipeline::new(&ctx, caps.borrow())
        .bootstrap_dependencies()
        .context("Dependency bootstrap failed")?;

    println!(
        "Bootstrapped {} dependencies into {}:",
        names.len(),
        ctx.layout.project_dir.display()
    );
    for name in names {
        println!("  - {name}");
    }
    Ok(())
}
