//! Test utilities for storage and service tests.
//!
//! `TestEnvironment` keeps a temporary data directory alive for the duration of
//! a test and removes it on drop, even if the test panics.
use anyhow::{anyhow, Result};
use shared::BoardDocument;
use std::sync::Mutex;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::document_repository::DocumentRepository;
use super::global_config_repository::DEFAULT_STORAGE_KEY;
use crate::backend::storage::traits::DocumentStorage;

pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    pub fn document_repository(&self) -> DocumentRepository {
        DocumentRepository::new(self.connection.clone(), DEFAULT_STORAGE_KEY)
    }
}

/// In-memory storage that counts writes and can be told to fail them
#[derive(Default)]
pub struct MemoryStorage {
    document: Mutex<Option<BoardDocument>>,
    writes: Mutex<usize>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn with_document(document: BoardDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<BoardDocument> {
        self.document.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl DocumentStorage for MemoryStorage {
    fn read_document(&self) -> Result<Option<BoardDocument>> {
        Ok(self.document.lock().unwrap().clone())
    }

    fn write_document(&self, document: &BoardDocument) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("disk full"));
        }
        *self.writes.lock().unwrap() += 1;
        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }
}
