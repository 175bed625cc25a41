//! # JSON Storage Module
//!
//! File-based storage for the star board.
//!
//! - One JSON document per data directory, named after the configured storage key
//! - Atomic writes (temp file + rename)
//! - Global configuration kept in `global_config.yaml`

pub mod connection;
pub mod document_repository;
pub mod global_config_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use document_repository::DocumentRepository;
pub use global_config_repository::{GlobalConfig, GlobalConfigRepository, GlobalConfigStorage};
