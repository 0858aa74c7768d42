//! System git backend
//!
//! Every operation shells out to the `git` binary found on PATH. Commands run
//! with `-C <repo>` and an isolated environment, so the repository location
//! and the credential plumbing are explicit inputs rather than ambient state.

use crate::core::error::{GitError, RelbookError, RelbookResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git backend using system git
pub struct SystemGit {
  /// Path the repository was opened from
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,

  /// Extra environment variables forwarded to git
  pub(crate) pass_env: Vec<String>,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to resolve the working tree root.
  pub fn open(path: &Path) -> RelbookResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") || stderr.contains("cannot change to") {
        return Err(RelbookError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(RelbookError::with_help(
        format!("Failed to open git repository: {}", stderr.trim_end()),
        "Point --repo at a directory inside a git working tree.",
      ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = PathBuf::from(stdout.trim());

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree,
      pass_env: Vec::new(),
    })
  }

  /// Forward these environment variables (in addition to PATH and HOME)
  pub fn with_pass_env(mut self, vars: &[String]) -> Self {
    self.pass_env = vars.to_vec();
    self
  }

  /// Working tree root
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Get current branch name
  pub fn current_branch(&self) -> RelbookResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string()); // Unborn or detached
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Run git with the given arguments, failing with git's own output on error
  pub(crate) fn run(&self, args: &[&str]) -> RelbookResult<Output> {
    let command = format!("git {}", args.join(" "));
    tracing::debug!(%command, repo = %self.repo_path.display(), "running git");

    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    if !output.status.success() {
      // `git commit` reports "nothing to commit" on stdout
      let stderr = String::from_utf8_lossy(&output.stderr);
      let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).to_string()
      } else {
        stderr.to_string()
      };
      return Err(RelbookError::Git(GitError::CommandFailed {
        command,
        output: text,
        code: output.status.code(),
      }));
    }

    tracing::trace!(stdout = %String::from_utf8_lossy(&output.stdout), "git succeeded");
    Ok(output)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists PATH, HOME and the configured pass-through variables
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    for var in ["PATH", "HOME"].iter().copied().chain(self.pass_env.iter().map(String::as_str)) {
      if let Ok(value) = std::env::var(var) {
        cmd.env(var, value);
      }
    }

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
