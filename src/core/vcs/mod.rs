//! Commit log access
//!
//! The pipeline only talks to [`CommitLog`]; [`SystemGit`] is the real
//! implementation and tests substitute an in-memory log.

pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::ChangelogResult;
use crate::core::range::RevisionRange;
use chrono::NaiveDate;

/// One line of `git log`: hash plus one-line summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
  pub sha: String,
  pub summary: String,
}

/// A commit with its full message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
  pub sha: String,
  pub summary: String,
  /// `subject + "\n\n" + body`, raw bytes as stored by git
  pub message: Vec<u8>,
}

impl CommitRecord {
  /// First line of the full message, lossily decoded (for log output)
  pub fn subject(&self) -> String {
    String::from_utf8_lossy(&self.message)
      .lines()
      .next()
      .unwrap_or_default()
      .trim()
      .to_string()
  }
}

/// Read-only view of the local repository history
pub trait CommitLog {
  /// Commits in `previous..new`, in git's native log order
  fn commits_in_range(&self, range: &RevisionRange) -> ChangelogResult<Vec<LogLine>>;

  /// Full message of a single commit
  fn full_message(&self, sha: &str) -> ChangelogResult<Vec<u8>>;

  /// Author date of a revision, day precision
  fn commit_date(&self, rev: &str) -> ChangelogResult<NaiveDate>;
}

/// Walk the range and pair every log line with its full message.
///
/// The order of the log is kept as-is.
pub fn scan_commits(log: &dyn CommitLog, range: &RevisionRange) -> ChangelogResult<Vec<CommitRecord>> {
  let lines = log.commits_in_range(range)?;
  let mut records = Vec::with_capacity(lines.len());
  for line in lines {
    let message = log.full_message(&line.sha)?;
    records.push(CommitRecord {
      sha: line.sha,
      summary: line.summary,
      message,
    });
  }
  Ok(records)
}
