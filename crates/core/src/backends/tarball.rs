use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

use crate::backends::Extractor;
use crate::error::{ProvisionError, ProvisionResult};

/// Extractor for gzip-compressed tarballs (`.tar.gz` / `.tgz`).
pub struct TarGzExtractor;

impl Extractor for TarGzExtractor {
    fn extract(&self, archive: &Path, dest_dir: &Path) -> ProvisionResult<()> {
        debug!(archive = %archive.display(), dest = %dest_dir.display(), "extracting archive");
        let decode = |message: String| ProvisionError::Decode {
            archive: archive.to_path_buf(),
            message,
        };

        let file = File::open(archive).map_err(|e| ProvisionError::fs(archive, e))?;
        let mut tarball = Archive::new(GzDecoder::new(file));
        tarball.set_preserve_permissions(true);
        tarball.unpack(dest_dir).map_err(|e| decode(e.to_string()))
    }
}
