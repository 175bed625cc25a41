//! # Domain Module
//!
//! Business rules for the star board, independent of storage and UI.
//!
//! ## Module Organization
//!
//! - **operations**: Pure mutations on the board document (stars, logs, catalog edits)
//! - **progress**: The "next reward" calculator
//! - **totals**: Lifetime earned/spent figures
//! - **document_store**: Load/save semantics over a [`DocumentStorage`](crate::backend::storage::DocumentStorage)
//! - **board_service**: Applies operations, persists, and fires feedback
//! - **parental_control_service**: PIN gate for parent-only edits
//! - **export_service**: Backup export, import validation, history CSV
//!
//! ## Business Rules
//!
//! - The star balance never goes below zero
//! - Reward costs and quick-action values are at least 1
//! - Logs are newest first and only ever prepended to
//! - A refused operation leaves the board exactly as it was

pub mod board_service;
pub mod commands;
pub mod defaults;
pub mod document_store;
pub mod export_service;
pub mod feedback;
pub mod ids;
pub mod operations;
pub mod parental_control_service;
pub mod progress;
pub mod totals;

pub use board_service::StarBoardService;
pub use document_store::DocumentStore;
pub use export_service::ImportError;
pub use feedback::{Feedback, SilentFeedback};
pub use operations::{OperationError, QuickActionUpdate, RewardUpdate};
pub use parental_control_service::{GateError, GateState, ParentGate};
pub use progress::compute_next;
