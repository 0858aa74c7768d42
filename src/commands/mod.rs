//! CLI commands for relbook
//!
//! - **release**: version file, changelog, status document, commit, tag, push
//! - **push**: commit and push pending changes (no-op on a clean tree)
//! - **status**: show what the bookkeeping documents currently say
//! - **init**: write a default relbook.toml
//!
//! All commands accept `&RepoContext` so the repository and config are resolved once.

pub mod init;
pub mod push;
pub mod release;
pub mod status;

pub use init::run_init;
pub use push::run_push;
pub use release::{ReleaseOptions, run_release};
pub use status::run_status;
