//! Repository context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   RepoContext::build(--repo) -> &RepoContext
//!   |
//!   v
//! commands/release.rs, push.rs, etc:
//!   fn run_*(ctx: &RepoContext, ...)
//! ```

use crate::core::config::RelbookConfig;
use crate::core::error::RelbookResult;
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

/// Everything a command needs to know about the target repository.
pub struct RepoContext {
  /// Working tree root (absolute path)
  pub root: PathBuf,

  /// Resolved configuration (defaults when no file exists)
  pub config: RelbookConfig,

  /// Where the configuration came from, if anywhere
  pub config_path: Option<PathBuf>,

  /// Git handle scoped to `root`
  pub git: SystemGit,
}

impl RepoContext {
  /// Build context for the repository containing `repo_path`.
  ///
  /// The config file is looked up at the working tree root, not at
  /// `repo_path`, so running from a subdirectory behaves the same.
  pub fn build(repo_path: &Path) -> RelbookResult<Self> {
    let git = SystemGit::open(repo_path)?;
    let root = git.work_tree().to_path_buf();

    let (config, config_path) = match RelbookConfig::load(&root)? {
      Some((config, path)) => (config, Some(path)),
      None => (RelbookConfig::default(), None),
    };
    tracing::debug!(root = %root.display(), config = ?config_path, "repository context ready");

    let git = git.with_pass_env(&config.git.pass_env);

    Ok(Self {
      root,
      config,
      config_path,
      git,
    })
  }

  /// Absolute path of a repository-relative file
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }

  /// Remote to push to: CLI override first, then config
  pub fn remote<'a>(&'a self, cli_override: Option<&'a str>) -> &'a str {
    cli_override.unwrap_or(&self.config.git.remote)
  }
}
