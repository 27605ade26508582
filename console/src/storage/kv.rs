//! String-keyed persistent store
//!
//! One file per key under a single directory. Writes go through a
//! temporary file and rename so a crash never leaves a half-written value.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::ConsoleError;

/// Persistent key-value store
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Create a store rooted at `dir`
    ///
    /// Keys are used as file names and must not contain path separators.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the value for `key`, or None if it was never written
    pub async fn get(&self, key: &str) -> Result<Option<String>, ConsoleError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `value` under `key`, replacing any previous value
    pub async fn set(&self, key: &str, value: &str) -> Result<(), ConsoleError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir).await?;

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &path).await?;
        Ok(())
    }

    /// Remove `key` if present
    pub async fn remove(&self, key: &str) -> Result<(), ConsoleError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, ConsoleError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ConsoleError::StorageError(format!("invalid key: {:?}", key)));
        }
        Ok(self.dir.join(key))
    }
}
