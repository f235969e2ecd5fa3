//! Changelog entries and the visible/hidden aggregate

use super::classify::{ChangeType, SKIP_CHANGELOG_LABEL, proposed_changelog};
use super::pull::PullRequestMetadata;
use super::render::block_safe;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One pull request in the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
  #[serde(rename = "type")]
  pub change_type: ChangeType,
  pub pull: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub issue: Option<u64>,
  pub authors: Vec<String>,
  pub message: String,
  /// Routed to the comment block instead of `changes`
  #[serde(skip)]
  pub hidden: bool,
}

impl ChangeEntry {
  /// Build the entry for a fetched pull request.
  ///
  /// `skip-changelog` entries are hidden and carry only the title; all others
  /// carry a review template with the title and the proposed changelog.
  pub fn from_pull_request(meta: &PullRequestMetadata, issue: Option<u64>, authors: Vec<String>) -> Self {
    let hidden = meta.has_label(SKIP_CHANGELOG_LABEL);
    let message = if hidden {
      format!("PR title: {}", meta.title)
    } else {
      block_safe(&format!(
        "TODO fixup changelog:\nPR title: {}\nProposed changelog:\n{}",
        meta.title,
        proposed_changelog(meta.body.as_deref())
      ))
    };

    Self {
      change_type: ChangeType::from_labels(meta.labels.as_slice()),
      pull: meta.number,
      issue,
      authors,
      message,
      hidden,
    }
  }
}

/// Entry kept out of the structured document, listed as a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenEntry {
  pub pull: u64,
  pub message: String,
}

/// Visible entries in display order plus hidden entries sorted by pull
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
  pub visible: Vec<ChangeEntry>,
  pub hidden: Vec<HiddenEntry>,
}

/// Collects entries as the pipeline produces them
#[derive(Debug, Default)]
pub struct Aggregator {
  visible: HashMap<ChangeType, Vec<ChangeEntry>>,
  hidden: Vec<HiddenEntry>,
}

impl Aggregator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, entry: ChangeEntry) {
    if entry.hidden {
      self.hidden.push(HiddenEntry {
        pull: entry.pull,
        message: entry.message,
      });
    } else {
      self.visible.entry(entry.change_type).or_default().push(entry);
    }
  }

  /// Group visible entries by type in [`ChangeType::DISPLAY_ORDER`] (arrival
  /// order within a group) and sort hidden entries by pull number.
  pub fn finish(mut self) -> Aggregate {
    let mut visible = Vec::new();
    for change_type in ChangeType::DISPLAY_ORDER {
      if let Some(entries) = self.visible.remove(&change_type) {
        visible.extend(entries);
      }
    }

    self.hidden.sort_by_key(|h| h.pull);

    Aggregate {
      visible,
      hidden: self.hidden,
    }
  }
}
