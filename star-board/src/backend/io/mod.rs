//! # IO Module
//!
//! Adapter layer between the terminal and the domain services: argument
//! parsing, text and JSON rendering, and terminal feedback.

pub mod cli;
