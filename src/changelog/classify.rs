//! Label-driven classification and proposed changelog extraction

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Label that routes a pull request to the hidden list
pub const SKIP_CHANGELOG_LABEL: &str = "skip-changelog";

/// Placeholder used when the pull request body has no usable proposal
pub const NO_PROPOSED_CHANGELOG: &str = "(No proposed changelog)";

static PROPOSED_SECTION: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)### Proposed changelog entries(.*?)(?:###|\z)").expect("proposed changelog pattern is valid")
});

static HTML_COMMENT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("HTML comment pattern is valid"));

/// Changelog entry type, derived from pull request labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
  #[serde(rename = "major rfe")]
  MajorRfe,
  #[serde(rename = "major bug")]
  MajorBug,
  #[serde(rename = "rfe")]
  Rfe,
  #[serde(rename = "bug")]
  Bug,
  #[serde(rename = "TODO")]
  Todo,
}

impl ChangeType {
  /// Order of the groups in the rendered document
  pub const DISPLAY_ORDER: [ChangeType; 5] = [
    ChangeType::MajorRfe,
    ChangeType::MajorBug,
    ChangeType::Rfe,
    ChangeType::Bug,
    ChangeType::Todo,
  ];

  /// Derive the type from a label set.
  ///
  /// Labels are checked in the fixed order `major-bug`, `major-rfe`, `bug`,
  /// `rfe` and every match overwrites the previous one, so the last match in
  /// that order wins: `{major-bug, bug}` yields `bug`.
  pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
    let has = |name: &str| labels.iter().any(|l| l.as_ref() == name);

    let mut change_type = ChangeType::Todo;
    if has("major-bug") {
      change_type = ChangeType::MajorBug;
    }
    if has("major-rfe") {
      change_type = ChangeType::MajorRfe;
    }
    if has("bug") {
      change_type = ChangeType::Bug;
    }
    if has("rfe") {
      change_type = ChangeType::Rfe;
    }
    change_type
  }

  /// Name as written in the document
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::MajorRfe => "major rfe",
      Self::MajorBug => "major bug",
      Self::Rfe => "rfe",
      Self::Bug => "bug",
      Self::Todo => "TODO",
    }
  }
}

impl fmt::Display for ChangeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The "Proposed changelog entries" section of a pull request body.
///
/// Carriage returns and HTML comments are removed and the result trimmed;
/// a missing or empty section yields [`NO_PROPOSED_CHANGELOG`].
pub fn proposed_changelog(body: Option<&str>) -> String {
  let proposal = body
    .and_then(|b| PROPOSED_SECTION.captures(b))
    .and_then(|c| c.get(1))
    .map(|m| {
      let text = m.as_str().replace('\r', "");
      HTML_COMMENT.replace_all(&text, "").trim().to_string()
    })
    .unwrap_or_default();

  if proposal.is_empty() {
    NO_PROPOSED_CHANGELOG.to_string()
  } else {
    proposal
  }
}
