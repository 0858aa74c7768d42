//! Status command - report what the bookkeeping documents currently say

use crate::core::context::RepoContext;
use crate::core::error::RelbookResult;
use crate::docs::changelog::ChangelogEntry;
use crate::docs::{ChangelogDocument, StatusDocument, StatusField};
use crate::utils::read_optional;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReleaseStatus {
  /// Contents of the version file, if present
  version_file: Option<String>,
  latest_entry: Option<ChangelogEntry>,
  current_version: Option<String>,
  next_target: Option<String>,
  branch: String,
  pending_changes: usize,
}

/// Run the status command
pub fn run_status(ctx: &RepoContext, json: bool) -> RelbookResult<()> {
  let files = &ctx.config.files;

  let version_file = read_optional(&ctx.path(&files.version))?.map(|v| v.trim().to_string());

  let latest_entry = read_optional(&ctx.path(&files.changelog))?
    .and_then(|text| ChangelogDocument::parse(Some(&text)).entries().into_iter().next());

  let (current_version, next_target) = match read_optional(&ctx.path(&files.status))? {
    Some(text) => {
      let doc = StatusDocument::parse(Some(&text));
      (
        doc.field(StatusField::CurrentVersion).map(str::to_string),
        doc.field(StatusField::NextTarget).map(str::to_string),
      )
    }
    None => (None, None),
  };

  let status = ReleaseStatus {
    version_file,
    latest_entry,
    current_version,
    next_target,
    branch: ctx.git.current_branch()?,
    pending_changes: ctx.git.pending_changes()?.len(),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&status)?);
  } else {
    print_status(ctx, &status);
  }

  Ok(())
}

fn print_status(ctx: &RepoContext, status: &ReleaseStatus) {
  let files = &ctx.config.files;
  let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| "(missing)".to_string());

  println!("\n📊 Release Status ({})\n", ctx.root.display());

  println!("{:<20} {}", files.version.display(), or_missing(&status.version_file));
  match &status.latest_entry {
    Some(entry) => {
      println!("{:<20} {} ({})", files.changelog.display(), entry.version, entry.date);
      for item in &entry.items {
        println!("{:<20}   - {}", "", item);
      }
    }
    None => println!("{:<20} (no entries)", files.changelog.display()),
  }
  println!(
    "{:<20} current {}, next {}",
    files.status.display(),
    or_missing(&status.current_version),
    or_missing(&status.next_target)
  );

  println!();
  if status.pending_changes == 0 {
    println!("✅ {}: working tree clean", status.branch);
  } else {
    println!("⚠️  {}: {} pending change(s)", status.branch, status.pending_changes);
  }

  if let (Some(file), Some(current)) = (&status.version_file, &status.current_version)
    && file != current
  {
    println!("⚠️  Version file says {} but status document says {}", file, current);
  }
}
