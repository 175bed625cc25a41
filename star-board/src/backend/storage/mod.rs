//! # Storage Module
//!
//! Handles persistence of the star board.
//!
//! The whole board lives in one JSON document inside a data directory, next to
//! a small YAML file with global settings. The domain layer only talks to the
//! [`DocumentStorage`] trait, so the backend can be swapped without touching
//! the mutation logic.
//!
//! ```text
//! data/
//! ├── global_config.yaml     ← storage key, backup file name, format version
//! └── star_board_v1.json     ← the board document
//! ```

pub mod json;
pub mod traits;

pub use json::{DocumentRepository, GlobalConfig, GlobalConfigRepository, GlobalConfigStorage, JsonConnection};
pub use traits::DocumentStorage;
