use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::backends::Fetcher;
use crate::error::{ProvisionError, ProvisionResult};

/// Fetcher backed by a blocking `reqwest` client.
///
/// `file://` URLs are copied straight from disk, which keeps offline setups
/// and tests off the network.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> ProvisionResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("hostprep/{}", crate::version()))
            .build()
            .map_err(|e| ProvisionError::Transport {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &str, dest: &Path) -> ProvisionResult<()> {
        let transport =
            |message: String| ProvisionError::Transport { url: url.to_string(), message };

        let mut response = self.client.get(url).send().map_err(|e| transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(transport(format!("HTTP {}", response.status())));
        }

        let mut file = fs::File::create(dest).map_err(|e| ProvisionError::fs(dest, e))?;
        let bytes = io::copy(&mut response, &mut file).map_err(|e| transport(e.to_string()))?;
        debug!(%url, bytes, "download complete");
        Ok(())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> ProvisionResult<()> {
        info!(%url, dest = %dest.display(), "fetching artifact");
        match url.strip_prefix("file://") {
            Some(local) => {
                fs::copy(local, dest).map_err(|e| ProvisionError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                Ok(())
            }
            None => self.fetch_http(url, dest),
        }
    }
}
