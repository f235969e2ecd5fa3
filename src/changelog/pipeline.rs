//! Commit range -> changelog draft
//!
//! ```text
//! scan_commits ─► ReferenceExtractor ─► fetch_pull_request ─► resolve_authors
//!                                                               │
//!                         render ◄─ Aggregator::finish ◄─ ChangeEntry
//! ```
//!
//! Everything runs sequentially. A pull request whose metadata cannot be
//! fetched is logged and left out; only local git failures abort the run.

use super::authors::resolve_authors;
use super::entry::{Aggregate, Aggregator, ChangeEntry};
use super::pull::fetch_pull_request;
use super::references::ReferenceExtractor;
use super::render::ChangelogDocument;
use crate::core::error::ChangelogResult;
use crate::core::range::RevisionRange;
use crate::core::vcs::{CommitLog, CommitRecord, scan_commits};
use crate::github::HostingApi;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Knobs that shape a run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
  /// Removed from the `new` revision to form the document version
  pub tag_prefix: String,
  /// Issue tracker key (`JENKINS`)
  pub issue_key: String,
  /// Credit `Co-authored-by:` trailers
  pub include_co_authors: bool,
}

impl Default for PipelineOptions {
  fn default() -> Self {
    Self {
      tag_prefix: "jenkins-".to_string(),
      issue_key: "JENKINS".to_string(),
      include_co_authors: false,
    }
  }
}

/// Result of a run: the structured document and the hidden entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDraft {
  pub document: ChangelogDocument,
  pub aggregate: Aggregate,
}

/// A pull request as first met in the log, with the first issue key any of
/// its commits carried
#[derive(Debug, Clone, Copy)]
struct PullReference {
  pull: u64,
  issue: Option<u64>,
}

pub struct ChangelogPipeline<'a> {
  log: &'a dyn CommitLog,
  api: &'a dyn HostingApi,
  extractor: ReferenceExtractor,
  options: PipelineOptions,
}

impl<'a> ChangelogPipeline<'a> {
  pub fn new(log: &'a dyn CommitLog, api: &'a dyn HostingApi, options: PipelineOptions) -> Self {
    Self {
      log,
      api,
      extractor: ReferenceExtractor::new(&options.issue_key),
      options,
    }
  }

  /// Build the draft for `range`
  pub fn run(&self, range: &RevisionRange) -> ChangelogResult<ChangelogDraft> {
    info!("Checking range from {}", range);

    let commits = scan_commits(self.log, range)?;
    info!("{} commits in range", commits.len());

    let mut aggregator = Aggregator::new();
    for reference in self.pull_references(&commits) {
      match self.entry_for(reference) {
        Ok(entry) => aggregator.push(entry),
        Err(e) => warn!("Failed to retrieve PR metadata for <<<<<{}>>>>>: {}", reference.pull, e),
      }
    }

    let aggregate = aggregator.finish();
    let document = ChangelogDocument {
      version: range.display_version(&self.options.tag_prefix),
      date: self.log.commit_date(&range.new)?,
      changes: aggregate.visible.clone(),
    };

    Ok(ChangelogDraft { document, aggregate })
  }

  /// Distinct pull requests in log order.
  ///
  /// A pull request referenced by several commits keeps its first position;
  /// its issue is the first one found on any of those commits.
  fn pull_references(&self, commits: &[CommitRecord]) -> Vec<PullReference> {
    let mut references: Vec<PullReference> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();

    for commit in commits {
      let refs = self.extractor.extract(&commit.summary, &commit.message);
      let Some(pull) = refs.pull else {
        info!("No PR found for {}: <<<<<{}>>>>>", commit.sha, commit.subject());
        continue;
      };

      match positions.get(&pull) {
        Some(&idx) => {
          debug!("PR {} already referenced, merging {}", pull, commit.sha);
          let existing = &mut references[idx];
          if existing.issue.is_none() {
            existing.issue = refs.issue;
          }
        }
        None => {
          info!("PR {} found for {}", pull, commit.sha);
          positions.insert(pull, references.len());
          references.push(PullReference { pull, issue: refs.issue });
        }
      }
    }

    references
  }

  fn entry_for(&self, reference: PullReference) -> ChangelogResult<ChangeEntry> {
    let meta = fetch_pull_request(self.api, reference.pull, self.options.include_co_authors)?;
    let authors = resolve_authors(self.api, &meta.commits);

    Ok(ChangeEntry::from_pull_request(&meta, reference.issue, authors))
  }
}
