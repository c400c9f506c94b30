//! Request-scoped working directory.
//!
//! Each download owns a unique directory holding the `parts/` artifact
//! directory and, after reassembly, the final file. Ownership of the
//! directory transfers to the caller on success; on failure the engine
//! removes it best-effort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Subdirectory holding one artifact per segment.
pub const PARTS_DIR: &str = "parts";

/// Deterministic artifact path for a segment index.
pub fn part_path(parts_dir: &Path, index: usize) -> PathBuf {
    parts_dir.join(format!("part-{index}"))
}

/// A uniquely named directory for one in-flight request. No cross-request
/// sharing: concurrent requests never collide.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Creates `fanget-<random>` under `parent` (parent is created if
    /// missing) along with its `parts` subdirectory.
    pub fn create(parent: &Path) -> io::Result<Self> {
        fs::create_dir_all(parent)?;
        let dir = tempfile::Builder::new()
            .prefix("fanget-")
            .tempdir_in(parent)?;
        // Detach from TempDir's drop-deletion; lifetime is managed by the
        // request and, on success, by the caller.
        let path = dir.into_path();
        fs::create_dir(path.join(PARTS_DIR))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parts_dir(&self) -> PathBuf {
        self.path.join(PARTS_DIR)
    }

    /// Hands the directory over to the caller, who becomes responsible for
    /// deleting it after consuming the file.
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Removes the directory and everything in it; failures are logged, not
    /// raised (used on the error path where the original error must win).
    pub fn remove_best_effort(&self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            tracing::warn!(dir = %self.path.display(), error = %e, "failed to clean up working directory");
        }
    }
}
