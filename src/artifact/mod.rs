//! Artifact Store
//!
//! Immutable blob storage addressed by `(run_id, artifact name)`.
//! Training writes the fitted scaler, column mapping, and model here; the
//! prediction pipeline reads them back by the run id recorded on the
//! registered version. An artifact is never overwritten once written.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Artifact names the prediction pipeline expects for every run.
pub const SCALER_ARTIFACT: &str = "scaler.json";
/// Column mapping artifact name.
pub const COLUMNS_ARTIFACT: &str = "columns.json";
/// Model artifact name.
pub const MODEL_ARTIFACT: &str = "model.json";

/// Errors from artifact storage operations.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {name} for run {run_id}")]
    NotFound { run_id: String, name: String },

    #[error("artifact already exists: {name} for run {run_id}")]
    AlreadyExists { run_id: String, name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for artifact storage operations
pub type Result<T> = std::result::Result<T, ArtifactError>;

/// Immutable blob storage keyed by run id and artifact name.
pub trait ArtifactStore: Send + Sync {
    /// Store a blob. Fails with [`ArtifactError::AlreadyExists`] if the
    /// key is already populated; artifacts are write-once.
    fn put(&mut self, run_id: &str, name: &str, bytes: &[u8]) -> Result<()>;

    /// Fetch a blob.
    fn get(&self, run_id: &str, name: &str) -> Result<Vec<u8>>;

    /// Check whether a blob exists.
    fn exists(&self, run_id: &str, name: &str) -> bool;
}

/// In-memory artifact store for testing.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    blobs: HashMap<(String, String), Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for InMemoryStore {
    fn put(&mut self, run_id: &str, name: &str, bytes: &[u8]) -> Result<()> {
        let key = (run_id.to_string(), name.to_string());
        if self.blobs.contains_key(&key) {
            return Err(ArtifactError::AlreadyExists {
                run_id: run_id.to_string(),
                name: name.to_string(),
            });
        }
        self.blobs.insert(key, bytes.to_vec());
        Ok(())
    }

    fn get(&self, run_id: &str, name: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(&(run_id.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound {
                run_id: run_id.to_string(),
                name: name.to_string(),
            })
    }

    fn exists(&self, run_id: &str, name: &str) -> bool {
        self.blobs
            .contains_key(&(run_id.to_string(), name.to_string()))
    }
}

/// Filesystem artifact store: one directory per run, one file per artifact.
///
/// # Example
///
/// ```no_run
/// use servir::artifact::{ArtifactStore, FsStore};
///
/// let mut store = FsStore::new("/var/lib/servir/artifacts");
/// store.put("run-8027", "scaler.json", b"{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `dir`, creating it lazily on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn artifact_path(&self, run_id: &str, name: &str) -> PathBuf {
        self.dir.join(run_id).join(name)
    }
}

impl ArtifactStore for FsStore {
    fn put(&mut self, run_id: &str, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.artifact_path(run_id, name);
        if path.exists() {
            return Err(ArtifactError::AlreadyExists {
                run_id: run_id.to_string(),
                name: name.to_string(),
            });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    fn get(&self, run_id: &str, name: &str) -> Result<Vec<u8>> {
        let path = self.artifact_path(run_id, name);
        if !path.exists() {
            return Err(ArtifactError::NotFound {
                run_id: run_id.to_string(),
                name: name.to_string(),
            });
        }
        Ok(fs::read(path)?)
    }

    fn exists(&self, run_id: &str, name: &str) -> bool {
        self.artifact_path(run_id, name).exists()
    }
}
