use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::model::{PayloadRoot, PeerRole, PeerRoot};
use crate::tree::{copy_dir_contents, remove_path};

/// Create `cache/` and `<tool>-client/` under `peer_root` and copy the payload's
/// contents into the client directory.
///
/// The client directory is replaced wholesale, so afterwards it holds exactly
/// the payload's contents. `cache/` is kept across restages.
pub fn stage_peer(
    peer_root: &Path,
    tool: &str,
    payload: &PayloadRoot,
) -> ProvisionResult<PeerRoot> {
    if !payload.path().is_dir() {
        return Err(ProvisionError::MissingPayload(payload.path().to_path_buf()));
    }
    info!(peer = %peer_root.display(), "setting up peer dirs");
    let peer = PeerRoot::new(peer_root, tool);
    remove_path(&peer.client_path)?;
    for dir in [&peer.cache_path, &peer.client_path] {
        fs::create_dir_all(dir).map_err(|e| ProvisionError::fs(dir, e))?;
    }
    copy_dir_contents(payload.path(), &peer.client_path)?;
    Ok(peer)
}

/// One staged peer in a built topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedPeer {
    pub role: PeerRole,
    pub root: PeerRoot,
}

/// Build `client/` and `server/` under `topology_root`, staging the same payload into both.
///
/// Peers are staged one after the other, client first. Their subtrees are
/// disjoint.
pub fn build_topology(
    topology_root: &Path,
    tool: &str,
    payload: &PayloadRoot,
) -> ProvisionResult<Vec<StagedPeer>> {
    for role in PeerRole::ALL {
        let dir = topology_root.join(role.dir_name());
        fs::create_dir_all(&dir).map_err(|e| ProvisionError::fs(&dir, e))?;
    }
    PeerRole::ALL
        .into_iter()
        .map(|role| {
            let root = stage_peer(&topology_root.join(role.dir_name()), tool, payload)?;
            Ok(StagedPeer { role, root })
        })
        .collect()
}
