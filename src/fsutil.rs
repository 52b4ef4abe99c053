//! Atomic text file replacement

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read a text file, attaching the path to any error
pub fn read_to_string(path: &Path) -> crate::Result<String> {
    std::fs::read_to_string(path).map_err(|e| crate::Error::filesystem(path, e))
}

/// Follow symlinks so the link target gets replaced, not the link itself
fn resolve_target(path: &Path) -> crate::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).map_err(|e| crate::Error::filesystem(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// Readers see either the old or the new file, never a partial one. The
/// original file's permissions are carried over.
pub fn write_atomic(path: &Path, contents: &str) -> crate::Result<()> {
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| crate::Error::filesystem(&dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| crate::Error::filesystem(tmp.path(), e))?;

    if let Ok(meta) = std::fs::metadata(&target) {
        std::fs::set_permissions(tmp.path(), meta.permissions())
            .map_err(|e| crate::Error::filesystem(tmp.path(), e))?;
    }

    tmp.persist(&target)
        .map_err(|e| crate::Error::filesystem(&target, e.error))?;
    Ok(())
}
