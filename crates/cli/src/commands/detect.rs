use anyhow::{Context, Result};
use serde::Serialize;

use hostprep_core::model::PlatformDescriptor;
use hostprep_core::platform;
use hostprep_core::services::resolver::resolver_for;

use crate::commands::load_context;

#[derive(Debug, Serialize)]
pub struct DetectInfo {
    pub platform: PlatformDescriptor,
    pub version_tag: String,
    pub architecture_supported: bool,
}

/// Print the detected platform and its version tag.
pub fn detect_command(json: bool) -> Result<()> {
    let descriptor = platform::detect();
    let info = DetectInfo {
        version_tag: descriptor.version_tag(),
        architecture_supported: descriptor.architecture.is_supported(),
        platform: descriptor,
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&info).context("Failed to serialize platform")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Platform");
    println!("  Architecture: {}", info.platform.architecture);
    if let hostprep_core::model::Architecture::Unsupported(raw) = &info.platform.architecture {
        println!("    (raw machine string: {raw})");
    }
    println!("  Distribution: {}", display_or_dash(&info.platform.distribution_id));
    println!("  Release: {}", display_or_dash(&info.platform.distribution_release));
    println!("  Version tag: {}", info.version_tag);
    Ok(())
}

/// Print the artifact URL the plan's resolver picks for this host.
pub fn resolve_command(root: &str) -> Result<()> {
    let ctx = load_context(root)?;
    let descriptor = platform::detect();
    let resolver = resolver_for(&ctx.plan.artifact);
    println!("{}", resolver.resolve(&descriptor));
    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
