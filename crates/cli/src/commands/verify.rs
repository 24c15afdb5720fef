use anyhow::{anyhow, Context, Result};

use hostprep_core::services::verify::verify_topology;

use crate::commands::load_context;

/// Compare the staged peer trees; fails when they are missing or differ.
pub fn verify_command(root: &str, json: bool) -> Result<()> {
    let ctx = load_context(root)?;
    let report = verify_topology(&ctx.layout, &ctx.plan.tool)
        .context("Failed to inspect staged peers")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Topology: {}", ctx.layout.topology_root.display());
        for peer in &report.peers {
            match &peer.digest {
                Some(digest) => println!(
                    "- {:?}: {} files, sha256 {} ({})",
                    peer.role, peer.file_count, digest, peer.client_path
                ),
                None => println!("- {:?}: MISSING ({})", peer.role, peer.client_path),
            }
        }
    }

    if report.identical {
        if !json {
            println!("Peers are identical.");
        }
        Ok(())
    } else if report.peers.iter().any(|p| !p.present) {
        Err(anyhow!("Topology incomplete under {}", ctx.layout.topology_root.display()))
    } else {
        Err(anyhow!("Peer trees differ under {}", ctx.layout.topology_root.display()))
    }
}
