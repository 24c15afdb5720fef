//! Host platform detection.
//!
//! Detection is informational: every failure here degrades to empty fields
//! instead of aborting a run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::model::{Architecture, PlatformDescriptor};

/// Default directory scanned for `*-release` files.
pub const DEFAULT_RELEASE_DIR: &str = "/etc";

/// Parse `KEY=value` lines into a map.
///
/// Lines are split on the first `=`. Blank lines, `#` comments and lines
/// without `=` are skipped. Surrounding double quotes on values are removed.
pub fn parse_release_lines(body: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            debug!(line, "skipping malformed release line");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        props.insert(key.to_string(), value.to_string());
    }
    props
}

/// List `*-release` files in `dir`, sorted by name. Missing dir yields nothing.
pub fn release_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), %err, "cannot list release metadata directory");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with("-release"))
        })
        .collect();
    files.sort();
    files
}

/// Read and merge every release file in order; later files win on duplicate keys.
pub fn read_release_metadata(files: &[PathBuf]) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for file in files {
        match fs::read_to_string(file) {
            Ok(body) => merged.extend(parse_release_lines(&body)),
            Err(err) => warn!(file = %file.display(), %err, "skipping unreadable release file"),
        }
    }
    merged
}

/// Build a descriptor from parsed metadata and a raw machine string.
///
/// Prefers the lsb `DISTRIB_*` keys and falls back to os-release `ID` /
/// `VERSION_ID`.
pub fn descriptor_from_parts(
    props: &BTreeMap<String, String>,
    machine: &str,
) -> PlatformDescriptor {
    let pick = |primary: &str, fallback: &str| {
        props.get(primary).or_else(|| props.get(fallback)).cloned().unwrap_or_default()
    };
    PlatformDescriptor::new(
        Architecture::from_machine(machine),
        pick("DISTRIB_ID", "ID"),
        pick("DISTRIB_RELEASE", "VERSION_ID"),
    )
}

/// Raw hardware architecture via `uname -m`, falling back to the build target.
pub fn machine_architecture() -> String {
    let from_uname = Command::new("uname").arg("-m").output().ok().and_then(|out| {
        if out.status.success() {
            let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        } else {
            None
        }
    });
    from_uname.unwrap_or_else(|| {
        warn!("uname -m unavailable, using compile-time architecture");
        std::env::consts::ARCH.to_string()
    })
}

/// Detect the host platform from `release_dir` and the running machine.
pub fn detect_in(release_dir: &Path) -> PlatformDescriptor {
    let files = release_files(release_dir);
    if files.is_empty() {
        warn!(dir = %release_dir.display(), "no release metadata found");
    }
    let props = read_release_metadata(&files);
    let descriptor = descriptor_from_parts(&props, &machine_architecture());
    if !descriptor.architecture.is_supported() {
        warn!(architecture = ?descriptor.architecture, "unsupported architecture");
    }
    debug!(?descriptor, "detected platform");
    descriptor
}

/// Detect the host platform from `/etc`.
pub fn detect() -> PlatformDescriptor {
    detect_in(Path::new(DEFAULT_RELEASE_DIR))
}
