//! YAML rendering of the changelog draft

use super::entry::{ChangeEntry, HiddenEntry};
use crate::core::error::{ChangelogResult, ResultExt};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The structured part of the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogDocument {
  pub version: String,
  pub date: NaiveDate,
  pub changes: Vec<ChangeEntry>,
}

/// Render the document as a one-element YAML sequence (the shape of a
/// changelog file entry) followed by one `# pull: N (message)` comment per
/// hidden entry.
///
/// Multi-line messages come out as literal block scalars, so the draft can be
/// edited in place.
pub fn render(document: &ChangelogDocument, hidden: &[HiddenEntry]) -> ChangelogResult<String> {
  let mut output =
    serde_yaml::to_string(&[document]).context("Failed to serialize changelog document")?;

  for entry in hidden {
    output.push_str(&format!("  # pull: {} ({})\n", entry.pull, entry.message));
  }

  Ok(output)
}

/// Make `text` emittable as a literal block scalar.
///
/// The emitter falls back to a quoted scalar with `\n` escapes when any line
/// ends in whitespace or contains a tab, so tabs become four spaces and
/// trailing whitespace is dropped.
pub fn block_safe(text: &str) -> String {
  text
    .lines()
    .map(|line| line.replace('\t', "    ").trim_end().to_string())
    .collect::<Vec<_>>()
    .join("\n")
}
