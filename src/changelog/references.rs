//! Pull request and issue references inside commit messages

use regex::Regex;
use std::sync::LazyLock;

/// `#12345)` or `#1234 ` as left by GitHub merge and squash commits
static PULL_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"#([0-9]{4,5})[) ]").expect("pull request pattern is valid"));

/// References found in one commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedReference {
  pub pull: Option<u64>,
  pub issue: Option<u64>,
}

/// Finds pull request numbers in summaries and issue keys in full messages
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
  issue_pattern: Regex,
}

impl ReferenceExtractor {
  /// `issue_key` is the tracker prefix, e.g. `JENKINS` for `JENKINS-12345`
  pub fn new(issue_key: &str) -> Self {
    let pattern = format!("{}-([0-9]{{3,5}})", regex::escape(issue_key));
    Self {
      issue_pattern: Regex::new(&pattern).expect("escaped issue key forms a valid pattern"),
    }
  }

  /// Both references of a commit
  pub fn extract(&self, summary: &str, message: &[u8]) -> ExtractedReference {
    ExtractedReference {
      pull: pull_number(summary),
      issue: self.issue_number(message),
    }
  }

  /// First issue reference in the full message
  pub fn issue_number(&self, message: &[u8]) -> Option<u64> {
    let message = normalize_message(message);
    self
      .issue_pattern
      .captures(&message)
      .and_then(|c| c.get(1))
      .and_then(|m| m.as_str().parse().ok())
  }
}

/// First pull request reference in a one-line summary
pub fn pull_number(summary: &str) -> Option<u64> {
  PULL_PATTERN
    .captures(summary)
    .and_then(|c| c.get(1))
    .and_then(|m| m.as_str().parse().ok())
}

/// Decode a commit message, replacing every invalid UTF-8 sequence with `?`
pub fn normalize_message(bytes: &[u8]) -> String {
  let mut out = String::with_capacity(bytes.len());
  for chunk in bytes.utf8_chunks() {
    out.push_str(chunk.valid());
    if !chunk.invalid().is_empty() {
      out.push('?');
    }
  }
  out
}
