//! # Backend Module
//!
//! Wires storage and domain services together for the command-line front end.
//! Everything here is synchronous; one process owns the data directory for the
//! length of a single command.

use anyhow::Result;
use log::info;
use std::path::PathBuf;

pub mod domain;
pub mod io;
pub mod storage;

use domain::{Feedback, StarBoardService};
use storage::{DocumentRepository, GlobalConfig, GlobalConfigRepository, GlobalConfigStorage, JsonConnection};

/// Main backend struct holding the board service and the global settings
pub struct Backend {
    pub board_service: StarBoardService<DocumentRepository>,
    pub config: GlobalConfig,
}

impl Backend {
    /// Open the board in `data_dir`, or in the default data directory when `None`
    pub fn new(data_dir: Option<PathBuf>, feedback: Box<dyn Feedback>) -> Result<Self> {
        let connection = match data_dir {
            Some(dir) => JsonConnection::new(dir)?,
            None => JsonConnection::new_default()?,
        };
        info!("Using data directory {}", connection.base_directory().display());

        let config = GlobalConfigRepository::new(connection.clone()).get_global_config()?;
        let repository = DocumentRepository::new(connection, config.storage_key.clone());
        let board_service = StarBoardService::open(repository, feedback);

        Ok(Backend { board_service, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::SilentFeedback;
    use tempfile::TempDir;

    #[test]
    fn test_backend_creates_config_and_persists_board() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut backend = Backend::new(Some(temp_dir.path().to_path_buf()), Box::new(SilentFeedback)).unwrap();
            assert_eq!(backend.config.storage_key, "star_board_v1");
            backend.board_service.add_star();
        }

        assert!(temp_dir.path().join("global_config.yaml").exists());
        assert!(temp_dir.path().join("star_board_v1.json").exists());

        let backend = Backend::new(Some(temp_dir.path().to_path_buf()), Box::new(SilentFeedback)).unwrap();
        assert_eq!(backend.board_service.document().profile.stars, 1);
    }
}
