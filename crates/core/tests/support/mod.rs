#![allow(dead_code)]

use std::cell::RefCell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use hostprep_core::backends::{BuildSandbox, Fetcher, SourceCloner};
use hostprep_core::{ProvisionError, ProvisionResult};

/// Write a .tar.gz at `path` holding `files` (relative path, contents).
pub fn write_tarball(path: &Path, files: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create tarball");
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (rel, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_path(rel).expect("set path");
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append(&header, &content[..]).expect("append entry");
    }
    builder.into_inner().expect("finish tar").finish().expect("finish gzip");
}

/// Payload used across tests: one top-level `payload/` directory.
pub const PAYLOAD_FILES: [(&str, &[u8]); 3] = [
    ("payload/utserver", b"#!/bin/sh\necho utserver\n"),
    ("payload/docs/README", b"readme"),
    ("payload/webui.zip", b"PK\x03\x04zip"),
];

/// Fetcher that copies a prepared local archive, ignoring the URL.
pub struct LocalArchiveFetcher {
    pub archive: PathBuf,
    pub calls: RefCell<Vec<String>>,
}

impl LocalArchiveFetcher {
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self { archive: archive.into(), calls: RefCell::new(Vec::new()) }
    }
}

impl Fetcher for LocalArchiveFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> ProvisionResult<()> {
        self.calls.borrow_mut().push(url.to_string());
        fs::copy(&self.archive, dest).map_err(|e| ProvisionError::fs(dest, e))?;
        Ok(())
    }
}

/// Fetcher that always fails like a dropped connection.
pub struct FailingFetcher;

impl Fetcher for FailingFetcher {
    fn fetch(&self, url: &str, _dest: &Path) -> ProvisionResult<()> {
        Err(ProvisionError::Transport { url: url.to_string(), message: "connection reset".into() })
    }
}

/// Cloner that creates the destination dir with a marker file and records calls.
#[derive(Default)]
pub struct RecordingCloner {
    pub calls: RefCell<Vec<(String, PathBuf)>>,
    /// URL that fails when cloned.
    pub fail_on: Option<String>,
}

impl SourceCloner for RecordingCloner {
    fn clone_repo(&self, url: &str, dest_dir: &Path) -> ProvisionResult<()> {
        self.calls.borrow_mut().push((url.to_string(), dest_dir.to_path_buf()));
        if self.fail_on.as_deref() == Some(url) {
            return Err(ProvisionError::Clone {
                url: url.to_string(),
                dest: dest_dir.to_path_buf(),
                message: "authentication required".into(),
            });
        }
        fs::create_dir_all(dest_dir).map_err(|e| ProvisionError::fs(dest_dir, e))?;
        fs::write(dest_dir.join("ORIGIN"), url).map_err(|e| ProvisionError::fs(dest_dir, e))?;
        Ok(())
    }
}

/// Sandbox that records every call in order.
#[derive(Default)]
pub struct RecordingSandbox {
    pub calls: RefCell<Vec<String>>,
}

impl BuildSandbox for RecordingSandbox {
    fn init(&self, project_dir: &Path) -> ProvisionResult<()> {
        self.calls.borrow_mut().push(format!("init {}", project_dir.display()));
        Ok(())
    }

    fn add_source(&self, project_dir: &Path, source: &Path) -> ProvisionResult<()> {
        let resolved = project_dir.join(source);
        assert!(resolved.is_dir(), "registered source must exist: {}", resolved.display());
        self.calls.borrow_mut().push(format!("add-source {}", source.display()));
        Ok(())
    }
}
