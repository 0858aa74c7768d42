//! Working-tree operations for SystemGit (status, staging, commit, tag, push)

use super::PendingChange;
use super::system_git::SystemGit;
use crate::core::error::{RelbookResult, ResultExt};

impl SystemGit {
  /// List uncommitted changes (staged, unstaged and untracked)
  pub fn pending_changes(&self) -> RelbookResult<Vec<PendingChange>> {
    let output = self.run(&["status", "--porcelain"])?;
    Ok(parse_porcelain(&String::from_utf8_lossy(&output.stdout)))
  }

  /// Stage every change in the working tree, including deletions
  pub fn stage_all(&self) -> RelbookResult<()> {
    self.run(&["add", "-A"])?;
    Ok(())
  }

  /// Create a commit from the index
  pub fn commit(&self, message: &str) -> RelbookResult<()> {
    self.run(&["commit", "-m", message])?;
    Ok(())
  }

  /// Whether `name` is acceptable to git as a tag name
  pub fn is_valid_tag_name(&self, name: &str) -> RelbookResult<bool> {
    let refname = format!("refs/tags/{}", name);
    let output = self
      .git_cmd()
      .args(["check-ref-format", &refname])
      .output()
      .context("Failed to execute git check-ref-format")?;
    Ok(output.status.success())
  }

  /// Create an annotated tag on HEAD
  pub fn create_annotated_tag(&self, name: &str, message: &str) -> RelbookResult<()> {
    self.run(&["tag", "-a", name, "-m", message])?;
    Ok(())
  }

  /// Push a branch or tag to a remote
  pub fn push(&self, remote: &str, refspec: &str) -> RelbookResult<()> {
    tracing::info!(remote, refspec, "pushing");
    self.run(&["push", remote, refspec])?;
    Ok(())
  }
}

/// Parse `git status --porcelain` (v1) output
fn parse_porcelain(stdout: &str) -> Vec<PendingChange> {
  stdout
    .lines()
    .filter(|line| line.len() > 3)
    .map(|line| PendingChange {
      status: line[..2].to_string(),
      path: line[3..].to_string(),
    })
    .collect()
}
