//! # Storage Traits
//!
//! Storage abstraction for the board document. The document is always read and
//! written whole; there are no partial updates.

use anyhow::Result;
use shared::BoardDocument;

/// Trait defining the interface for board document storage
pub trait DocumentStorage: Send + Sync {
    /// Read the stored document.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and an error when
    /// the stored bytes cannot be read or parsed.
    fn read_document(&self) -> Result<Option<BoardDocument>>;

    /// Replace the stored document
    fn write_document(&self, document: &BoardDocument) -> Result<()>;
}
