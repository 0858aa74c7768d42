//! File helpers for the bookkeeping documents

use crate::core::error::{RelbookResult, ResultExt};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a text file, treating a missing file as `None`
pub fn read_optional(path: &Path) -> RelbookResult<Option<String>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
  }
}

/// Replace a file's contents atomically
///
/// Writes a temporary file next to the target and renames it into place, so
/// readers see either the old or the new document. Existing permissions are
/// carried over; missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str) -> RelbookResult<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

  let permissions = fs::metadata(path).ok().map(|m| m.permissions());

  let mut tmp = NamedTempFile::new_in(dir).with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
  tmp
    .write_all(contents.as_bytes())
    .with_context(|| format!("Failed to write {}", path.display()))?;

  match permissions {
    Some(perms) => tmp.as_file().set_permissions(perms)?,
    None => set_default_permissions(tmp.as_file())?,
  }

  tmp
    .persist(path)
    .map_err(|e| e.error)
    .with_context(|| format!("Failed to replace {}", path.display()))?;
  Ok(())
}

// Temp files are created 0600; a brand-new document should look like any other file
#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> std::io::Result<()> {
  use std::os::unix::fs::PermissionsExt;
  file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> std::io::Result<()> {
  Ok(())
}
