//! # JSON Document Repository
//!
//! Stores the board as a single pretty-printed JSON file named after the
//! storage key, e.g. `star_board_v1.json`.

use anyhow::{Context, Result};
use log::debug;
use shared::BoardDocument;
use std::fs;
use std::path::PathBuf;

use super::connection::JsonConnection;
use crate::backend::storage::traits::DocumentStorage;

/// File-backed repository for the board document
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    connection: JsonConnection,
    storage_key: String,
}

impl DocumentRepository {
    /// Create a repository for the document stored under `storage_key`
    pub fn new(connection: JsonConnection, storage_key: impl Into<String>) -> Self {
        Self {
            connection,
            storage_key: storage_key.into(),
        }
    }

    /// Full path of the document file
    pub fn document_path(&self) -> PathBuf {
        self.connection.document_path(&self.storage_key)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl DocumentStorage for DocumentRepository {
    fn read_document(&self) -> Result<Option<BoardDocument>> {
        let path = self.document_path();
        if !path.exists() {
            debug!("No board document at {:?}", path);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read board document {:?}", path))?;
        let document: BoardDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse board document {:?}", path))?;

        debug!("Loaded board document from {:?}", path);
        Ok(Some(document))
    }

    fn write_document(&self, document: &BoardDocument) -> Result<()> {
        let path = self.document_path();
        let json = serde_json::to_vec_pretty(document)?;
        self.connection
            .write_atomic(&path, &json)
            .with_context(|| format!("Failed to write board document {:?}", path))?;

        debug!("Saved board document to {:?} ({} bytes)", path, json.len());
        Ok(())
    }
}
