//! Quick push: commit everything pending and push the current branch

use crate::core::context::RepoContext;
use crate::core::error::{RelbookError, RelbookResult, ValidationError};

/// Run the push command
///
/// A clean working tree is a successful no-op: nothing is committed and
/// nothing is pushed.
pub fn run_push(ctx: &RepoContext, message: &str, remote: Option<&str>, dry_run: bool) -> RelbookResult<()> {
  if message.trim().is_empty() {
    return Err(RelbookError::Validation(ValidationError::Empty { field: "commit message" }));
  }

  let pending = ctx.git.pending_changes()?;
  if pending.is_empty() {
    tracing::info!("working tree clean, skipping commit and push");
    println!("✨ Nothing to commit, working tree clean");
    return Ok(());
  }

  let remote = ctx.remote(remote);
  let branch = ctx.git.current_branch()?;

  if dry_run {
    println!("📋 {} pending change(s) would be committed:", pending.len());
    for change in &pending {
      println!("   {} {}", change.status, change.path);
    }
    println!();
    println!("  Commit: {}", message);
    println!("  Push:   {} -> {}", branch, remote);
    println!();
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  ctx.git.stage_all()?;
  ctx.git.commit(message)?;
  ctx.git.push(remote, &branch)?;

  println!("✅ Pushed {} change(s) to {}/{}", pending.len(), remote, branch);
  Ok(())
}
