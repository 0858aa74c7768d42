//! Integration tests for `relbook release`

use crate::helpers::{TestRepo, git, run_relbook, run_relbook_raw};
use anyhow::Result;

#[test]
fn test_release_updates_documents_tags_and_pushes() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("CHANGELOG.md", "# Changelog\n\n## [1.0.0] - 2024-01-01\n- Initial\n\n")?;
  repo.commit("Add changelog")?;

  let output = run_relbook(
    &repo.path,
    &["release", "1.1.0", "Bug fixes", "1.2.0", "--date", "2024-02-01"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("1.1.0"), "confirmation should name the version: {}", stdout);

  // Documents
  assert_eq!(repo.read_file("VERSION")?, "1.1.0");
  assert_eq!(
    repo.read_file("CHANGELOG.md")?,
    "# Changelog\n\n## [1.1.0] - 2024-02-01\n- Bug fixes\n\n## [1.0.0] - 2024-01-01\n- Initial\n\n"
  );
  assert_eq!(
    repo.read_file("STATUS.md")?,
    "# Project Status\n\n- Current Version: 1.1.0\n- Next Target: 1.2.0\n"
  );

  // Commit
  assert_eq!(repo.head_subject()?, "v1.1.0: Bug fixes");
  assert!(repo.porcelain()?.is_empty(), "everything should be committed");

  // Annotated tag with message
  let tag_type = git(&repo.path, &["cat-file", "-t", "v1.1.0"])?;
  assert_eq!(String::from_utf8_lossy(&tag_type.stdout).trim(), "tag");
  let tag_body = git(&repo.path, &["cat-file", "-p", "v1.1.0"])?;
  assert!(String::from_utf8_lossy(&tag_body.stdout).contains("v1.1.0: Bug fixes"));

  // Pushed branch and tag
  assert_eq!(repo.remote_head_sha()?, repo.head_sha()?);
  assert!(repo.remote_tags()?.contains(&"v1.1.0".to_string()));

  Ok(())
}

#[test]
fn test_release_creates_missing_documents() -> Result<()> {
  let repo = TestRepo::new()?;

  run_relbook(&repo.path, &["release", "2.0.0", "First release", "2.1.0", "--date", "2024-03-15"])?;

  assert_eq!(repo.read_file("VERSION")?, "2.0.0");
  assert_eq!(
    repo.read_file("CHANGELOG.md")?,
    "# Changelog\n\n## [2.0.0] - 2024-03-15\n- First release\n\n"
  );
  assert_eq!(
    repo.read_file("STATUS.md")?,
    "# Project Status\n\n- Current Version: 2.0.0\n- Next Target: 2.1.0\n"
  );

  Ok(())
}

#[test]
fn test_consecutive_releases_newest_first() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("STATUS.md", "# Project Status\n\n- Owner: alice\n")?;
  repo.commit("Add status")?;

  run_relbook(&repo.path, &["release", "1.0.0", "Initial", "1.1.0", "--date", "2024-01-01"])?;
  run_relbook(&repo.path, &["release", "1.1.0", "Bug fixes", "1.2.0", "--date", "2024-02-01"])?;

  let changelog = repo.read_file("CHANGELOG.md")?;
  let newer = changelog.find("## [1.1.0] - 2024-02-01").expect("newer entry");
  let older = changelog.find("## [1.0.0] - 2024-01-01").expect("older entry");
  assert!(newer < older);

  let status = repo.read_file("STATUS.md")?;
  assert_eq!(
    status,
    "# Project Status\n\n- Owner: alice\n- Current Version: 1.1.0\n- Next Target: 1.2.0\n"
  );

  let tags = repo.remote_tags()?;
  assert!(tags.contains(&"v1.0.0".to_string()));
  assert!(tags.contains(&"v1.1.0".to_string()));

  Ok(())
}

#[test]
fn test_release_dry_run_changes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  let head_before = repo.head_sha()?;

  let output = run_relbook(&repo.path, &["release", "1.0.0", "Initial", "1.1.0", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Dry-run"));
  assert!(stdout.contains("v1.0.0"));
  assert!(!repo.file_exists("VERSION"));
  assert!(!repo.file_exists("CHANGELOG.md"));
  assert_eq!(repo.head_sha()?, head_before);
  assert!(repo.remote_tags()?.is_empty());

  Ok(())
}

#[test]
fn test_release_dry_run_json() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("VERSION", "0.9.0")?;
  repo.commit("Add version file")?;

  let output = run_relbook(
    &repo.path,
    &["release", "1.0.0", "Initial", "1.1.0", "--date", "2024-01-01", "--dry-run", "--json"],
  )?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["version"], "1.0.0");
  assert_eq!(json["date"], "2024-01-01");
  assert_eq!(json["tag"], "v1.0.0");
  assert_eq!(json["tag_message"], "v1.0.0: Initial");
  assert_eq!(json["remote"], "origin");
  assert_eq!(json["branch"], "main");
  assert_eq!(json["files"][0]["path"], "VERSION");
  assert_eq!(json["files"][0]["action"], "update");
  assert_eq!(json["files"][1]["action"], "create");

  Ok(())
}

#[test]
fn test_dry_run_json_stays_parseable_with_warning() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relbook(&repo.path, &["release", "1.2.0", "s", "1.1.0", "--dry-run", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["version"], "1.2.0");
  assert_eq!(json["next_target"], "1.1.0");
  assert!(String::from_utf8_lossy(&output.stderr).contains("not ahead"));

  Ok(())
}

#[test]
fn test_blank_summary_writes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  let commits_before = repo.commit_count()?;

  let output = run_relbook_raw(&repo.path, &["release", "1.0.0", "  ", "1.1.0", "--date", "2024-01-01"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stderr).contains("summary"));
  assert!(!repo.file_exists("VERSION"));
  assert!(!repo.file_exists("CHANGELOG.md"));
  assert!(!repo.file_exists("STATUS.md"));
  assert_eq!(repo.commit_count()?, commits_before);

  Ok(())
}

#[test]
fn test_version_that_is_not_a_tag_name_writes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  let commits_before = repo.commit_count()?;

  for version in ["1.0..0", "1.0~1", "1.0^"] {
    let output = run_relbook_raw(&repo.path, &["release", version, "Broken", "1.1.0"])?;
    assert_eq!(output.status.code(), Some(3), "version {}", version);
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a valid git tag name"));
  }

  assert!(!repo.file_exists("VERSION"));
  assert!(!repo.file_exists("CHANGELOG.md"));
  assert_eq!(repo.commit_count()?, commits_before);
  assert!(repo.porcelain()?.is_empty());

  Ok(())
}

#[test]
fn test_invalid_version_writes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relbook_raw(&repo.path, &["release", "1.0 beta", "Initial", "1.1.0"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stderr).contains("whitespace"));
  assert!(!repo.file_exists("VERSION"));
  assert!(!repo.file_exists("STATUS.md"));

  Ok(())
}

#[test]
fn test_invalid_date_writes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relbook_raw(&repo.path, &["release", "1.0.0", "Initial", "1.1.0", "--date", "01/02/2024"])?;
  assert!(!output.status.success());
  assert!(!repo.file_exists("CHANGELOG.md"));

  Ok(())
}

#[test]
fn test_missing_argument_is_rejected() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relbook_raw(&repo.path, &["release", "1.0.0", "Initial"])?;
  assert!(!output.status.success());
  assert!(!repo.file_exists("VERSION"));

  Ok(())
}

#[test]
fn test_push_failure_keeps_written_documents() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relbook_raw(
    &repo.path,
    &["release", "3.0.0", "Big one", "3.1.0", "--remote", "nowhere"],
  )?;

  assert!(!output.status.success());
  // git's own error text, unwrapped
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("nowhere"), "stderr: {}", stderr);
  assert!(!stderr.contains("❌"));

  // No rollback: documents, commit and local tag stay
  assert_eq!(repo.read_file("VERSION")?, "3.0.0");
  assert_eq!(repo.head_subject()?, "v3.0.0: Big one");
  git(&repo.path, &["rev-parse", "v3.0.0"])?;
  assert!(repo.remote_tags()?.is_empty());

  Ok(())
}

#[test]
fn test_release_uses_config_file() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file(
    "relbook.toml",
    r#"
[files]
version = "VERSION.txt"
changelog = "docs/CHANGELOG.md"
status = "docs/STATUS.md"

[git]
tag_prefix = "release-"
"#,
  )?;
  repo.commit("Add relbook config")?;

  run_relbook(&repo.path, &["release", "0.5.0", "Preview", "0.6.0", "--date", "2024-05-05"])?;

  assert_eq!(repo.read_file("VERSION.txt")?, "0.5.0");
  assert!(repo.read_file("docs/CHANGELOG.md")?.contains("## [0.5.0] - 2024-05-05\n- Preview\n"));
  assert!(repo.read_file("docs/STATUS.md")?.contains("- Next Target: 0.6.0\n"));
  assert!(!repo.file_exists("VERSION"));
  assert_eq!(repo.head_subject()?, "release-0.5.0: Preview");
  assert!(repo.remote_tags()?.contains(&"release-0.5.0".to_string()));

  Ok(())
}

#[test]
fn test_release_from_subdirectory_with_repo_flag() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/lib.rs", "pub fn answer() -> u32 { 42 }\n")?;
  repo.commit("Add source")?;

  let elsewhere = tempfile::TempDir::new()?;
  let repo_arg = repo.path.join("src");
  run_relbook(
    elsewhere.path(),
    &["--repo", &repo_arg.to_string_lossy(), "release", "1.0.0", "Initial", "1.1.0"],
  )?;

  // Documents land at the working tree root, not in src/
  assert_eq!(repo.read_file("VERSION")?, "1.0.0");
  assert!(!repo.file_exists("src/VERSION"));

  Ok(())
}
