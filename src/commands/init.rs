//! Init command - write a relbook.toml holding every default

use crate::core::config::RelbookConfig;
use crate::core::context::RepoContext;
use crate::core::error::{ConfigError, RelbookError, RelbookResult};

/// Run the init command
pub fn run_init(ctx: &RepoContext, force: bool) -> RelbookResult<()> {
  if let Some(existing) = &ctx.config_path
    && !force
  {
    return Err(RelbookError::Config(ConfigError::AlreadyExists { path: existing.clone() }));
  }

  let path = RelbookConfig::default().save(&ctx.root)?;
  println!("✅ Wrote {}", path.display());
  println!();
  println!("Next steps:");
  println!("  relbook status");
  println!("  relbook release <VERSION> <SUMMARY> <NEXT_TARGET> --dry-run");

  Ok(())
}
