//! Release command implementation
//!
//! A release is straight-line bookkeeping:
//! 1. Version file, changelog and status document are rewritten
//! 2. Everything is committed and tagged `<prefix><version>`
//! 3. Branch and tag are pushed
//!
//! All three documents are computed in memory, and the tag name checked,
//! before the first write, so invalid input never leaves partial edits
//! behind. A failing git step does not roll back the documents already
//! written.

use crate::core::context::RepoContext;
use crate::core::error::{RelbookError, RelbookResult, ValidationError};
use crate::docs::record::{parse_date, single_line};
use crate::docs::{ReleaseRecord, prepend_changelog_entry, upsert_status_fields};
use crate::utils::{read_optional, write_atomic};
use serde::Serialize;
use std::path::PathBuf;

/// Inputs of `relbook release`
pub struct ReleaseOptions {
  pub version: String,
  pub summary: String,
  pub next_target: String,
  /// `YYYY-MM-DD`; today (local time) when absent
  pub date: Option<String>,
  pub remote: Option<String>,
  pub dry_run: bool,
  pub json: bool,
}

/// Everything a release will do, computed up front
#[derive(Debug, Serialize)]
pub struct ReleasePlan {
  pub version: String,
  pub date: String,
  pub next_target: String,
  pub tag: String,
  pub tag_message: String,
  pub remote: String,
  pub branch: String,
  pub files: Vec<PlannedWrite>,
}

#[derive(Debug, Serialize)]
pub struct PlannedWrite {
  /// Relative to the repository root
  pub path: PathBuf,
  pub action: WriteAction,
  #[serde(skip)]
  pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteAction {
  Create,
  Update,
}

/// Run the release command
pub fn run_release(ctx: &RepoContext, opts: ReleaseOptions) -> RelbookResult<()> {
  let date = match &opts.date {
    Some(input) => parse_date(input)?,
    None => chrono::Local::now().date_naive(),
  };
  let record = ReleaseRecord::new(&opts.version, &opts.summary, date)?;

  let next_target = single_line(&opts.next_target);
  if next_target.is_empty() {
    return Err(RelbookError::Validation(ValidationError::Empty { field: "next target" }));
  }

  if let Some(warning) = next_target_warning(record.version(), &next_target) {
    tracing::warn!(version = record.version(), next_target = %next_target, "next target not ahead of release");
    eprintln!("⚠️  {}", warning);
  }

  let plan = ReleasePlan::build(ctx, &record, &next_target, opts.remote.as_deref())?;

  if opts.dry_run {
    if opts.json {
      println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
      print_plan(&plan);
      println!();
      println!("🔍 Dry-run mode (no changes applied)");
    }
    return Ok(());
  }

  println!("📦 Releasing {}", record.version());
  plan.apply(ctx)?;

  println!();
  println!("✅ Released version {} ({} pushed to {})", plan.version, plan.tag, plan.remote);
  Ok(())
}

impl ReleasePlan {
  /// Read the current documents and compute their new contents
  pub fn build(
    ctx: &RepoContext,
    record: &ReleaseRecord,
    next_target: &str,
    remote: Option<&str>,
  ) -> RelbookResult<Self> {
    let files = &ctx.config.files;
    let tag = ctx.config.git.tag_name(record.version());
    if !ctx.git.is_valid_tag_name(&tag)? {
      return Err(RelbookError::Validation(ValidationError::BadTagName { tag }));
    }
    let tag_message = format!("{}: {}", tag, record.summary());

    let changelog = read_optional(&ctx.path(&files.changelog))?;
    let status = read_optional(&ctx.path(&files.status))?;

    let writes = vec![
      PlannedWrite {
        path: files.version.clone(),
        action: action_for(ctx, &files.version),
        contents: record.version().to_string(),
      },
      PlannedWrite {
        path: files.changelog.clone(),
        action: action_for(ctx, &files.changelog),
        contents: prepend_changelog_entry(changelog.as_deref(), record),
      },
      PlannedWrite {
        path: files.status.clone(),
        action: action_for(ctx, &files.status),
        contents: upsert_status_fields(status.as_deref(), record.version(), next_target),
      },
    ];

    Ok(Self {
      version: record.version().to_string(),
      date: record.date_string(),
      next_target: next_target.to_string(),
      tag,
      tag_message,
      remote: ctx.remote(remote).to_string(),
      branch: ctx.git.current_branch()?,
      files: writes,
    })
  }

  /// Write the documents, then commit, tag and push
  pub fn apply(&self, ctx: &RepoContext) -> RelbookResult<()> {
    for write in &self.files {
      write_atomic(&ctx.path(&write.path), &write.contents)?;
      println!("   Updated {}", write.path.display());
    }

    ctx.git.stage_all()?;
    ctx.git.commit(&self.tag_message)?;
    println!("   Committed \"{}\"", self.tag_message);

    ctx.git.create_annotated_tag(&self.tag, &self.tag_message)?;
    println!("   Created tag: {}", self.tag);

    ctx.git.push(&self.remote, &self.branch)?;
    ctx.git.push(&self.remote, &format!("refs/tags/{}", self.tag))?;
    println!("   Pushed {} and {} to {}", self.branch, self.tag, self.remote);

    Ok(())
  }
}

fn action_for(ctx: &RepoContext, path: &std::path::Path) -> WriteAction {
  if ctx.path(path).exists() {
    WriteAction::Update
  } else {
    WriteAction::Create
  }
}

/// Warn when both values are semver and the target does not move forward
fn next_target_warning(version: &str, next_target: &str) -> Option<String> {
  let parse = |s: &str| semver::Version::parse(s.strip_prefix('v').unwrap_or(s)).ok();
  let current = parse(version)?;
  let next = parse(next_target)?;
  (next <= current).then(|| format!("Next target {} is not ahead of release {}", next_target, version))
}

fn print_plan(plan: &ReleasePlan) {
  println!("📋 Release Plan for {}", plan.version);
  println!();
  println!("  Date:        {}", plan.date);
  println!("  Next target: {}", plan.next_target);
  println!();
  println!("  Files:");
  for write in &plan.files {
    let verb = match write.action {
      WriteAction::Create => "create",
      WriteAction::Update => "update",
    };
    println!("    {:<7} {}", verb, write.path.display());
  }
  println!();
  println!("  Commit:  {}", plan.tag_message);
  println!("  Tag:     {} (annotated)", plan.tag);
  println!("  Push:    {} -> {}", plan.branch, plan.remote);
}
