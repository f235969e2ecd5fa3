//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway clone-like repository with the marker file in place
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a repository with the default marker file committed
  pub fn new() -> Result<Self> {
    let repo = Self::bare()?;
    std::fs::write(repo.path.join("licenseCompleter.groovy"), "// marker\n")?;
    repo.commit_at("Initial commit", "2019-04-01T10:00:00")?;
    Ok(repo)
  }

  /// Create a repository without any marker file or commits
  pub fn bare() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    Ok(Self { _root: root, path })
  }

  /// Commit an empty change with a fixed author/committer date
  pub fn commit_at(&self, message: &str, date: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    let output = Command::new("git")
      .current_dir(&self.path)
      .args(["commit", "--allow-empty", "-m", message])
      .env("GIT_AUTHOR_DATE", date)
      .env("GIT_COMMITTER_DATE", date)
      .output()
      .context("Failed to run git commit")?;
    if !output.status.success() {
      anyhow::bail!("git commit failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Tag HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Write a file relative to the repository root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }
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

/// Run the changelog-drafter binary; the exit status is left to the caller
pub fn run_drafter(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_changelog-drafter");

  let mut cmd = Command::new(bin);
  cmd
    .current_dir(cwd)
    .args(args)
    .env_remove("GITHUB_AUTH")
    .env_remove("CHANGELOG_YAML_PATH")
    .env("RUST_LOG", "info");
  for (key, value) in envs {
    cmd.env(key, value);
  }

  cmd.output().context("Failed to run changelog-drafter")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
