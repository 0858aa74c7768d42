//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A working repository with a bare `origin` it can push to
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  pub remote: PathBuf,
}

impl TestRepo {
  /// Create a repository with one commit on `main`, already pushed to `origin`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("work");
    let remote = root.path().join("remote.git");
    std::fs::create_dir_all(&path)?;

    git(root.path(), &["init", "--bare", "--initial-branch=main", "remote.git"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;
    git(&path, &["remote", "add", "origin", &remote.to_string_lossy()])?;

    std::fs::write(path.join("README.md"), "# Test project\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;
    git(&path, &["push", "-u", "origin", "main"])?;

    Ok(Self {
      _root: root,
      path,
      remote,
    })
  }

  /// Write a file relative to the working tree
  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let file = self.path.join(rel);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file, content)?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "-A"])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head_sha()
  }

  pub fn head_sha(&self) -> Result<String> {
    stdout_of(git(&self.path, &["rev-parse", "HEAD"])?)
  }

  /// SHA of `main` on the bare remote
  pub fn remote_head_sha(&self) -> Result<String> {
    stdout_of(git(&self.remote, &["rev-parse", "main"])?)
  }

  /// Tags present on the bare remote
  pub fn remote_tags(&self) -> Result<Vec<String>> {
    let out = stdout_of(git(&self.remote, &["tag", "-l"])?)?;
    Ok(out.lines().map(String::from).collect())
  }

  /// Subject line of the HEAD commit
  pub fn head_subject(&self) -> Result<String> {
    stdout_of(git(&self.path, &["log", "-1", "--format=%s"])?)
  }

  pub fn commit_count(&self) -> Result<usize> {
    Ok(stdout_of(git(&self.path, &["rev-list", "--count", "HEAD"])?)?.parse()?)
  }

  /// `git status --porcelain` output
  pub fn porcelain(&self) -> Result<String> {
    stdout_of(git(&self.path, &["status", "--porcelain"])?)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

fn stdout_of(output: Output) -> Result<String> {
  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run relbook and return its output whatever the exit status
pub fn run_relbook_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let relbook_bin = env!("CARGO_BIN_EXE_relbook");

  Command::new(relbook_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relbook")
}

/// Run relbook, failing the test if it exits non-zero
pub fn run_relbook(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_relbook_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "relbook command failed: relbook {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
