//! Text file helpers.
//!
//! Rule files come from many hands; bytes that are not valid UTF-8 are
//! dropped rather than failing the whole run.

use anyhow::{Context as _, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Decode bytes as UTF-8, dropping invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, ""),
    }
}

/// Read a text file. A missing file is `None`.
pub fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(decode_lossy(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read a text file that must exist.
pub fn read_required(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(decode_lossy(&bytes))
}

/// Write a text file, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bytes_are_dropped() {
        assert_eq!(decode_lossy(b"DOMAIN,a\xff.com\n"), "DOMAIN,a.com\n");
        assert_eq!(decode_lossy("DOMAIN,\u{fffd}.com".as_bytes()), "DOMAIN,\u{fffd}.com");
    }

    #[test]
    fn missing_optional_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_optional(&dir.path().join("absent.txt")).unwrap().is_none());
    }

    #[test]
    fn write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.list");
        write_text(&path, "DOMAIN,x.com\n").unwrap();
        assert_eq!(read_required(&path).unwrap(), "DOMAIN,x.com\n");
    }
}
