//! Directory tree helpers: removal, recursive copy, listing, and content digests.
//!
//! Walks never follow symlinks. A symlink is copied, listed and hashed as a
//! link (its target path), so a tree is described the same way whether or
//! not its links resolve.

use std::fs;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{ProvisionError, ProvisionResult};

/// Remove `path` and everything below it, if present. A symlink is unlinked, never followed.
pub fn remove_path(path: &Path) -> ProvisionResult<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| ProvisionError::fs(path, e))
        }
        Ok(_) => fs::remove_file(path).map_err(|e| ProvisionError::fs(path, e)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ProvisionError::fs(path, err)),
    }
}

/// Recursively copy the *contents* of `src` into `dest`.
///
/// `dest` is created if needed. Existing entries with the same relative path
/// are replaced; a symlink already sitting at a destination path is removed
/// first so nothing is ever written through it. Unrelated files already in
/// `dest` are left alone.
pub fn copy_dir_contents(src: &Path, dest: &Path) -> ProvisionResult<u64> {
    fs::create_dir_all(dest).map_err(|e| ProvisionError::fs(dest, e))?;
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let to = dest.join(relative_to(src, entry.path())?);
        let file_type = entry.file_type();

        unlink_symlink(&to)?;
        if file_type.is_dir() {
            fs::create_dir_all(&to).map_err(|e| ProvisionError::fs(&to, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &to)?;
            copied += 1;
        } else {
            fs::copy(entry.path(), &to).map_err(|e| ProvisionError::fs(&to, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn unlink_symlink(path: &Path) -> ProvisionResult<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::remove_file(path).map_err(|e| ProvisionError::fs(path, e))
        }
        _ => Ok(()),
    }
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> ProvisionResult<()> {
    let target = fs::read_link(from).map_err(|e| ProvisionError::fs(from, e))?;
    if fs::symlink_metadata(to).is_ok() {
        remove_path(to)?;
    }
    std::os::unix::fs::symlink(&target, to).map_err(|e| ProvisionError::fs(to, e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> ProvisionResult<()> {
    fs::copy(from, to).map(|_| ()).map_err(|e| ProvisionError::fs(to, e))
}

/// All non-directory paths under `root` (files and symlinks), relative to it, sorted.
pub fn list_files(root: &Path) -> ProvisionResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        out.push(relative_to(root, entry.path())?.to_path_buf());
    }
    out.sort();
    Ok(out)
}

/// SHA-256 over every entry's relative path, kind, and content, in sorted order.
///
/// Regular files contribute their bytes; symlinks contribute their target
/// path. Two trees with the same digest hold identical entries at the same paths.
pub fn tree_digest(root: &Path) -> ProvisionResult<String> {
    let mut hasher = Sha256::new();
    for rel in list_files(root)? {
        let path = root.join(&rel);
        hasher.update(rel.to_string_lossy().as_bytes());
        hasher.update([0u8]);

        let meta = fs::symlink_metadata(&path).map_err(|e| ProvisionError::fs(&path, e))?;
        if meta.file_type().is_symlink() {
            let target = fs::read_link(&path).map_err(|e| ProvisionError::fs(&path, e))?;
            hasher.update(b"L");
            hasher.update(target.to_string_lossy().as_bytes());
        } else {
            hasher.update(b"F");
            let file = fs::File::open(&path).map_err(|e| ProvisionError::fs(&path, e))?;
            let mut reader = BufReader::new(file);
            let mut buf = [0u8; 8192];
            loop {
                let n = reader.read(&mut buf).map_err(|e| ProvisionError::fs(&path, e))?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
        }
        hasher.update([0u8]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn relative_to<'p>(root: &Path, path: &'p Path) -> ProvisionResult<&'p Path> {
    path.strip_prefix(root).map_err(|_| {
        ProvisionError::fs(
            path,
            io::Error::other(format!("path is not under {}", root.display())),
        )
    })
}

fn walk_error(root: &Path, err: walkdir::Error) -> ProvisionError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    ProvisionError::fs(path, err.into())
}
