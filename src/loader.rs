//! Module Loader — reads a binary module image off disk.
//!
//! Existence is checked before the read so a bad path gets its own
//! condition; everything else is a single `fs::read`. No caching, no
//! partial-read recovery. Structural validation of the bytes is the
//! engine's job, not ours.

use std::path::Path;

use tracing::debug;

use crate::error::HostError;

/// An immutable binary module image.
///
/// Handed to the host by value and released once the engine has compiled
/// it, whether or not instantiation succeeds.
pub struct ModuleImage {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ModuleImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleImage")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl ModuleImage {
    /// Wrap module bytes already held in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Raw module bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read a module image from `path`.
///
/// `ModuleNotFound` if the path does not exist prior to the read;
/// `ModuleRead` for anything the read itself reports (permissions,
/// directories, truncation).
pub fn load(path: &Path) -> Result<ModuleImage, HostError> {
    if !path.exists() {
        return Err(HostError::ModuleNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| HostError::ModuleRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("loaded module {} ({} bytes)", path.display(), bytes.len());

    Ok(ModuleImage::from_bytes(bytes))
}
