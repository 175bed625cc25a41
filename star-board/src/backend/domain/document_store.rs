//! Load/save semantics on top of [`DocumentStorage`].
//!
//! Reading never fails: a missing or unreadable document is replaced by the
//! seed document. Writes are fire-and-forget; a failure is logged and
//! reported as `false`, and the in-memory board stays authoritative.

use log::{error, info, warn};
use shared::BoardDocument;

use super::defaults::default_document;
use crate::backend::storage::DocumentStorage;

pub struct DocumentStore<S: DocumentStorage> {
    storage: S,
}

impl<S: DocumentStorage> DocumentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the stored document, falling back to the default board
    pub fn load(&self) -> BoardDocument {
        match self.storage.read_document() {
            Ok(Some(document)) => {
                info!(
                    "Loaded board for {} ({} stars, {} rewards)",
                    document.profile.name,
                    document.profile.stars,
                    document.rewards.len()
                );
                document
            }
            Ok(None) => {
                info!("No stored board found, starting from the default board");
                default_document()
            }
            Err(e) => {
                warn!("Stored board is unreadable, starting from the default board: {:#}", e);
                default_document()
            }
        }
    }

    /// Persist the whole document. Returns false if the write failed.
    pub fn save(&self, document: &BoardDocument) -> bool {
        match self.storage.write_document(document) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save board: {:#}", e);
                false
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
