// src/watch/fingerprint.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

/// Compute the hash of a single file.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file = File::open(path)
        .with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Hash of in-memory contents, same format as [`compute_file_hash`].
pub fn hash_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Remembers the last seen content hash of the task file.
///
/// Filesystem events fire for saves that don't change anything (touch,
/// editor swap files, metadata); only real content changes should produce a
/// new snapshot.
#[derive(Debug, Default)]
pub struct ContentFingerprint {
    last: Option<String>,
}

impl ContentFingerprint {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Start from an already known hash.
    pub fn with_hash(hash: String) -> Self {
        Self { last: Some(hash) }
    }

    /// Record `hash`; returns `true` if it differs from the previous one.
    pub fn update(&mut self, hash: String) -> bool {
        if self.last.as_deref() == Some(hash.as_str()) {
            debug!("task file content unchanged");
            return false;
        }
        self.last = Some(hash);
        true
    }
}
