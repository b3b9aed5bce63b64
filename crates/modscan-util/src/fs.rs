use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::hash::blake3_bytes;

/// A source file read for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File contents as UTF-8, invalid sequences replaced.
    pub text: String,
    /// BLAKE3 hex digest of the raw bytes on disk.
    pub hash: String,
    /// Invalid UTF-8 was replaced, so offsets into `text` may not match
    /// byte offsets in the file.
    pub lossy: bool,
}

/// Read a source file, hashing its raw bytes before replacing invalid UTF-8
/// sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> io::Result<SourceFile> {
    let bytes = fs::read(path)?;
    let hash = blake3_bytes(&bytes);
    let (text, lossy) = match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
    };
    Ok(SourceFile { text, hash, lossy })
}

/// Write `bytes` to `path` through a temp file in the same directory, so the
/// target holds either the old or the new contents.
///
/// # Errors
/// Returns an error if the temp file cannot be written or persisted.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
