//! Revision range resolution
//!
//! Turns the single command-line argument into the `previous..new` pair that
//! the commit scanner walks.

use crate::core::error::{ChangelogError, ChangelogResult};
use std::fmt;

/// Two revisions (tags, branches or hashes); `previous` is expected to be an
/// ancestor of `new`, but that is left for git to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
  pub previous: String,
  pub new: String,
}

impl RevisionRange {
  /// Resolve a `revA..revB` range or a bare `X.Y` release version.
  ///
  /// A bare version is prefixed with `tag_prefix` and the previous release is
  /// the same version with its last component decremented (`2.174` becomes
  /// `jenkins-2.173..jenkins-2.174`). The decremented tag is not checked.
  pub fn resolve(arg: &str, tag_prefix: &str) -> ChangelogResult<Self> {
    let arg = arg.trim();

    if let Some((previous, new)) = arg.split_once("..") {
      if previous.is_empty() || new.is_empty() {
        return Err(ChangelogError::with_help(
          format!("Incomplete revision range '{}'", arg),
          "Specify both ends of the range, e.g. jenkins-2.174..master",
        ));
      }
      return Ok(Self {
        previous: previous.to_string(),
        new: new.to_string(),
      });
    }

    let new = format!("{}{}", tag_prefix, arg);
    let (head, last) = arg.rsplit_once('.').ok_or_else(|| not_a_version(arg))?;
    let last: u64 = last.parse().map_err(|_| not_a_version(arg))?;
    if head.is_empty() {
      return Err(not_a_version(arg));
    }
    let Some(previous_last) = last.checked_sub(1) else {
      return Err(ChangelogError::with_help(
        format!("Cannot derive the release before '{}'", arg),
        "Pass an explicit range instead, e.g. jenkins-2.0..jenkins-3.0",
      ));
    };

    Ok(Self {
      previous: format!("{}{}.{}", tag_prefix, head, previous_last),
      new,
    })
  }

  /// Version string shown in the document: `new` with the first tag prefix removed
  pub fn display_version(&self, tag_prefix: &str) -> String {
    if tag_prefix.is_empty() {
      return self.new.clone();
    }
    self.new.replacen(tag_prefix, "", 1)
  }

  /// Argument for `git log`
  pub fn as_git_range(&self) -> String {
    format!("{}..{}", self.previous, self.new)
  }
}

impl fmt::Display for RevisionRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} to {}", self.previous, self.new)
  }
}

fn not_a_version(arg: &str) -> ChangelogError {
  ChangelogError::with_help(
    format!("'{}' is neither a revision range nor a release version", arg),
    "Use a range like jenkins-2.174..master or a version like 2.174",
  )
}
