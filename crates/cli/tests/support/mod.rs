#![allow(dead_code)]

use std::fs::{self, File};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Write a .tar.gz at `path` holding `files` and return its `file://` URL.
pub fn tarball_url(path: &Path, files: &[(&str, &[u8])]) -> String {
    let file = File::create(path).expect("create tarball");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (rel, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_path(rel).expect("set path");
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, &content[..]).expect("append entry");
    }
    builder.into_inner().expect("finish tar").finish().expect("finish gzip");
    format!("file://{}", path.display())
}

pub const PAYLOAD: [(&str, &[u8]); 2] =
    [("utorrent-server-v3_0/utserver", b"binary"), ("utorrent-server-v3_0/docs/README", b"docs")];

/// Write a plan that keeps dependency bootstrap to a single fake repository.
pub fn write_small_plan(root: &Path) {
    fs::write(
        root.join("hostprep.yaml"),
        "dependencies:\n  - https://example.invalid/asians-cloud/tcp-proxy\n",
    )
    .expect("write plan");
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = fs::metadata(path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod script");
}
