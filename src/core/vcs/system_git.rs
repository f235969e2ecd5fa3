//! System git backend
//!
//! Every query is one blocking `git` subprocess. Output is parsed from fixed
//! `--format` strings so user configuration (decorations, colours) cannot
//! change what we read.

use super::{CommitLog, LogLine};
use crate::core::error::{ChangelogError, ChangelogResult, GitError, ResultExt};
use crate::core::range::RevisionRange;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Git backend using system git
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ChangelogResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ChangelogError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ChangelogError::message(format!(
        "Failed to open git repository: {}",
        stderr
      )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root of the opened repository
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Run git with `args`, failing on a non-zero exit status
  fn run(&self, args: &[&str]) -> ChangelogResult<Output> {
    let command = format!("git {}", args.join(" "));
    debug!("running {}", command);

    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ChangelogError::Git(GitError::CommandFailed {
        command,
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(output)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("color.ui=never");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("i18n.logOutputEncoding=UTF-8");

    cmd
  }
}

impl CommitLog for SystemGit {
  fn commits_in_range(&self, range: &RevisionRange) -> ChangelogResult<Vec<LogLine>> {
    let git_range = range.as_git_range();
    let output = self.run(&["log", "--format=%H %s", git_range.as_str(), "--"])?;

    String::from_utf8_lossy(&output.stdout)
      .lines()
      .filter(|line| !line.trim().is_empty())
      .map(|line| {
        parse_log_line(line).ok_or_else(|| {
          ChangelogError::Git(GitError::UnexpectedOutput {
            command: format!("git log {}", git_range),
            output: line.to_string(),
          })
        })
      })
      .collect()
  }

  fn full_message(&self, sha: &str) -> ChangelogResult<Vec<u8>> {
    let output = self.run(&["log", "-1", "--format=%s%n%n%b", sha, "--"])?;
    Ok(output.stdout)
  }

  fn commit_date(&self, rev: &str) -> ChangelogResult<NaiveDate> {
    let output = self.run(&["log", "-1", "--format=%ad", "--date=short", rev, "--"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let date = NaiveDate::parse_from_str(stdout.trim(), "%Y-%m-%d")
      .with_context(|| format!("git returned '{}' as the date of {}", stdout.trim(), rev))?;
    Ok(date)
  }
}

/// Split `"<40 hex> <summary>"`
fn parse_log_line(line: &str) -> Option<LogLine> {
  let (sha, summary) = line.split_once(' ').unwrap_or((line, ""));
  if !is_valid_sha(sha) {
    return None;
  }
  Some(LogLine {
    sha: sha.to_string(),
    summary: summary.to_string(),
  })
}

/// Validate SHA format (40 lowercase hex chars)
fn is_valid_sha(sha: &str) -> bool {
  sha.len() == 40 && sha.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_log_line() {
    let sha = "0123456789abcdef0123456789abcdef01234567";
    let line = format!("{} Merge pull request #4012 from user/branch", sha);
    let parsed = parse_log_line(&line).unwrap();
    assert_eq!(parsed.sha, sha);
    assert_eq!(parsed.summary, "Merge pull request #4012 from user/branch");
  }

  #[test]
  fn test_parse_log_line_empty_subject() {
    let sha = "a".repeat(40);
    let parsed = parse_log_line(&sha).unwrap();
    assert_eq!(parsed.summary, "");
  }

  #[test]
  fn test_parse_log_line_rejects_garbage() {
    assert!(parse_log_line("not a sha at all").is_none());
    assert!(parse_log_line(&format!("{} short", "a".repeat(39))).is_none());
  }

  #[test]
  fn test_is_valid_sha() {
    assert!(is_valid_sha("a".repeat(40).as_str()));
    assert!(!is_valid_sha("z".repeat(40).as_str()));
    assert!(!is_valid_sha("A".repeat(40).as_str()));
    assert!(!is_valid_sha("a".repeat(39).as_str()));
  }
}
