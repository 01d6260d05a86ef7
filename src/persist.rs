//! Disk I/O helpers: create, load, atomic write, remove.
//!
//! None of these lock anything. [`Store`](crate::Store) calls them with its
//! lock held.
//!
//! The rename-over approach is close to atomic on most platforms. On FAT32 or
//! network shares there are no hard guarantees.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::serializer::Serializer;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Create `path` (and its parent directories) if it doesn't exist. Never
/// truncates an existing file.
pub fn ensure_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map(drop)
        .map_err(Error::from)
}

/// Reads and deserializes the file at `path`. A missing or empty file yields
/// an empty document. Anything else that fails to decode is an error.
pub fn load<S: Serializer>(path: &Path, serializer: &S) -> Result<Document> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    if bytes.is_empty() {
        return Ok(Document::default());
    }
    let doc: Document = serializer.deserialize(&bytes)?;
    doc.check()?;
    Ok(doc)
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write, and a reader
/// only ever sees the old or the new contents.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    let written = std::fs::write(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::Io(e.to_string()));
    }
    Ok(())
}

/// Delete the file at `path`. Returns `false` if it was already gone.
pub fn remove(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Io(e.to_string())),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    path.with_extension(format!("{ext}.tmp"))
}
