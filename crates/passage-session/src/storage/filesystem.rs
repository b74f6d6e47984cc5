//! Filesystem session storage
//!
//! One file per key under a base directory. Writes go through a temporary
//! file and a rename so a crash never leaves a half-written token behind.
//! On Unix the files are owner read/write only.

use super::SessionStorage;
use async_trait::async_trait;
use passage_core::{PassageError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const TEMP_SUFFIX: &str = ".tmp";

#[cfg(unix)]
const PRIVATE_MODE: u32 = 0o600;

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    base_path: PathBuf,
}

impl FileSessionStorage {
    /// Create a storage rooted at `base_path`. The directory is created lazily
    /// on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the stored values
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(PassageError::invalid(format!(
                "storage key {key:?} must be non-empty ASCII alphanumerics, '_', '-' or '.'"
            )));
        }
        Ok(self.base_path.join(key))
    }
}

/// Write `value` to a freshly created file that only the owner can read.
///
/// A leftover file at `path` is removed first so its permissions are not
/// inherited.
async fn write_private(path: &Path, value: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(PRIVATE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(value).await?;
    file.sync_all().await
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PassageError::storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn save(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            PassageError::storage(format!(
                "failed to create {}: {e}",
                self.base_path.display()
            ))
        })?;

        let temp_path = self.base_path.join(format!("{key}{TEMP_SUFFIX}"));
        write_private(&temp_path, &value).await.map_err(|e| {
            PassageError::storage(format!("failed to write {}: {e}", temp_path.display()))
        })?;

        fs::rename(&temp_path, &path).await.map_err(|e| {
            PassageError::storage(format!("failed to commit {}: {e}", path.display()))
        })?;

        debug!(key, bytes = value.len(), "Stored session value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PassageError::storage(format!(
                "failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session"));

        assert_eq!(storage.load("token").await.unwrap(), None);
        storage.save("token", b"opaque".to_vec()).await.unwrap();
        assert_eq!(
            storage.load("token").await.unwrap(),
            Some(b"opaque".to_vec())
        );
        assert!(!dir.path().join("session/token.tmp").exists());

        // A second handle on the same directory sees the value.
        let reopened = FileSessionStorage::new(dir.path().join("session"));
        assert_eq!(
            reopened.load("token").await.unwrap(),
            Some(b"opaque".to_vec())
        );

        assert!(storage.remove("token").await.unwrap());
        assert!(!storage.remove("token").await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());
        storage.save("token", b"x".to_vec()).await.unwrap();
        let mode = std::fs::metadata(dir.path().join("token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stale_temp_file_permissions_are_not_inherited() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("token.tmp");
        std::fs::write(&stale, b"old").unwrap();
        std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_private(&stale, b"new").await.unwrap();
        let mode = std::fs::metadata(&stale).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&stale).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = storage.save(key, vec![1]).await.unwrap_err();
            assert!(matches!(err, PassageError::Invalid { .. }), "{key:?}");
        }
    }
}
