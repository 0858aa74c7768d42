pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

/// One entry of `git status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PendingChange {
  /// Two-letter XY status code, e.g. ` M`, `??`, `A `
  pub status: String,
  /// Path as reported by git (for renames, `old -> new`)
  pub path: String,
}
