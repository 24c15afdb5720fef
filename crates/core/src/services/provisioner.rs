use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::backends::{Extractor, Fetcher};
use crate::error::{ProvisionError, ProvisionResult};
use crate::model::{ArtifactReference, PayloadRoot};
use crate::tree::remove_path;

/// Downloads and unpacks the artifact into a freshly wiped staging directory.
pub struct ArtifactProvisioner<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub extractor: &'a dyn Extractor,
}

impl<'a> ArtifactProvisioner<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, extractor: &'a dyn Extractor) -> Self {
        Self { fetcher, extractor }
    }

    /// Provision `url` under `target_dir` and return the payload root.
    ///
    /// Anything already at `target_dir` is removed first. The archive is saved
    /// as `target_dir/<archive_name>` and unpacked into `target_dir/unarchived`;
    /// the first top-level directory (by name) becomes the payload root.
    pub fn provision(
        &self,
        url: &str,
        target_dir: &Path,
        archive_name: &str,
    ) -> ProvisionResult<PayloadRoot> {
        debug!(dir = %target_dir.display(), "removing previous staging state");
        remove_path(target_dir)?;
        let unarchived = target_dir.join("unarchived");
        fs::create_dir_all(&unarchived).map_err(|e| ProvisionError::fs(&unarchived, e))?;

        let reference = ArtifactReference {
            url: url.to_string(),
            local_archive_path: target_dir.join(archive_name),
        };
        info!(url = %reference.url, "downloading artifact");
        self.fetcher.fetch(&reference.url, &reference.local_archive_path)?;
        info!(archive = %reference.local_archive_path.display(), "download finished");

        self.extractor.extract(&reference.local_archive_path, &unarchived)?;
        let payload = select_payload(&unarchived)?;
        debug!(payload = %payload.path().display(), "selected payload root");
        Ok(payload)
    }
}

/// First top-level directory of `unarchived`, in name order.
///
/// Any other top-level entries are ignored with a warning. Extraction that
/// produced no directory at all has no payload.
pub fn select_payload(unarchived: &Path) -> ProvisionResult<PayloadRoot> {
    let mut entries = fs::read_dir(unarchived)
        .map_err(|e| ProvisionError::fs(unarchived, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ProvisionError::fs(unarchived, e))?;
    entries.sort();

    let Some(index) = entries.iter().position(|p| p.is_dir()) else {
        if !entries.is_empty() {
            warn!(count = entries.len(), "archive has no top-level directory");
        }
        return Err(ProvisionError::EmptyArchive(unarchived.to_path_buf()));
    };
    let payload = entries.remove(index);
    if !entries.is_empty() {
        let ignored: Vec<String> = entries
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        warn!(payload = %payload.display(), ?ignored, "ignoring extra top-level archive entries");
    }
    Ok(PayloadRoot::new(payload))
}
