//! # Marksheet
//!
//! Library half of the Marksheet binary: the HTTP API, the CLI and the
//! configuration layer. `main.rs` only sets up logging and dispatches.

pub mod api;
pub mod cli;
pub mod config;
