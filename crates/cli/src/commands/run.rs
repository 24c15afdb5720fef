use anyhow::{Context, Result};

use hostprep_core::platform;
use hostprep_core::services::pipeline::{Pipeline, RunSummary};

use crate::commands::{load_context, require_workspace_cwd, DefaultCapabilities};

/// Run the full provisioning pipeline.
pub fn run_command(root: &str, skip_deps: bool, json: bool) -> Result<()> {
    let ctx = load_context(root)?;
    require_workspace_cwd(&ctx)?;

    let descriptor = platform::detect();
    if !json {
        println!("Platform: {}", descriptor.version_tag());
    }

    let caps = DefaultCapabilities::for_plan(&ctx.plan)?;
    let summary = Pipeline::new(&ctx, caps.borrow())
        .run(descriptor, skip_deps)
        .context("Provisioning run failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?
        );
    } else {
        print_summary(&summary);
    }
    Ok(())
}

pub fn print_summary(summary: &RunSummary) {
    println!("Provisioning complete:");
    println!("  Resolver: {}", summary.resolver);
    println!("  Artifact: {}", summary.artifact_url);
    println!("  Payload: {}", summary.payload_root.display());
    for peer in &summary.peers {
        println!("  Peer {:?}: {}", peer.role, peer.root.client_path.display());
    }
    if summary.bootstrapped {
        println!("  Dependencies ({}):", summary.dependencies.len());
        for dep in &summary.dependencies {
            println!("    - {dep}");
        }
    } else {
        println!("  Dependencies: skipped");
    }
}
