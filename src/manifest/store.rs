use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::manifest::Manifest;

/// Durable storage for the package manifest
pub trait ManifestStore: Send + Sync {
    fn load(&self) -> Result<Manifest>;

    fn persist(&self, manifest: &Manifest) -> Result<()>;
}

/// `package.json` on disk
pub struct FileManifestStore {
    path: PathBuf,
}

impl FileManifestStore {
    /// Store for `<root>/package.json`
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        FileManifestStore {
            path: root.as_ref().join("package.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestStore for FileManifestStore {
    fn load(&self) -> Result<Manifest> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            ReleaseError::manifest(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        Manifest::from_json(&text)
    }

    fn persist(&self, manifest: &Manifest) -> Result<()> {
        fs::write(&self.path, manifest.to_json()?)?;
        Ok(())
    }
}

/// Manifest store that keeps everything in memory and counts writes
pub struct MemoryManifestStore {
    current: Mutex<Manifest>,
    writes: Mutex<Vec<Manifest>>,
}

impl MemoryManifestStore {
    pub fn new(manifest: Manifest) -> Self {
        MemoryManifestStore {
            current: Mutex::new(manifest),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Every manifest passed to `persist`, in order
    pub fn writes(&self) -> Vec<Manifest> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes().len()
    }
}

impl ManifestStore for MemoryManifestStore {
    fn load(&self) -> Result<Manifest> {
        Ok(self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn persist(&self, manifest: &Manifest) -> Result<()> {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = manifest.clone();
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(manifest.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "sfdx-cli", "version": "7.1.0"}"#,
        )
        .unwrap();

        let store = FileManifestStore::in_dir(dir.path());
        let mut manifest = store.load().unwrap();
        manifest.set_version("7.2.0");
        store.persist(&manifest).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.version().unwrap(), "7.2.0");
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  \"version\": \"7.2.0\""));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileManifestStore::in_dir(dir.path()).load().unwrap_err();
        assert!(matches!(err, ReleaseError::Manifest(_)));
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let manifest = Manifest::from_json(r#"{"name": "a", "version": "1.0.0"}"#).unwrap();
        let store = MemoryManifestStore::new(manifest.clone());
        assert_eq!(store.write_count(), 0);
        store.persist(&manifest).unwrap();
        assert_eq!(store.write_count(), 1);
    }
}
