//! Core plumbing shared by every relbook command
//!
//! - **config**: relbook.toml parsing and validation
//! - **context**: repository root, configuration and git handle, built once
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: system git wrapper

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
