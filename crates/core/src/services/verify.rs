use serde::{Deserialize, Serialize};

use crate::error::ProvisionResult;
use crate::model::PeerRole;
use crate::tree::{list_files, tree_digest};
use crate::workspace::WorkspaceLayout;

/// Digest of one peer's staged client tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerDigest {
    pub role: PeerRole,
    pub client_path: String,
    pub present: bool,
    pub file_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Comparison of every peer's staged client tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyReport {
    pub peers: Vec<PeerDigest>,
    /// True when every peer is present and all digests match.
    pub identical: bool,
}

/// Hash each peer's `<tool>-client` tree and check they all match.
pub fn verify_topology(layout: &WorkspaceLayout, tool: &str) -> ProvisionResult<TopologyReport> {
    let mut peers = Vec::new();
    for role in PeerRole::ALL {
        let root = layout.peer_root(role, tool);
        let present = root.client_path.is_dir() && root.cache_path.is_dir();
        let (file_count, digest) = if present {
            (list_files(&root.client_path)?.len(), Some(tree_digest(&root.client_path)?))
        } else {
            (0, None)
        };
        peers.push(PeerDigest {
            role,
            client_path: root.client_path.display().to_string(),
            present,
            file_count,
            digest,
        });
    }

    let first = peers.first().and_then(|p| p.digest.clone());
    let identical = first.is_some() && peers.iter().all(|p| p.digest == first);
    Ok(TopologyReport { peers, identical })
}
