//! Pull request metadata as the changelog sees it

use crate::core::error::ChangelogResult;
use crate::github::HostingApi;
use crate::github::models::PullRequestCommit;
use regex::Regex;
use std::sync::LazyLock;

static CO_AUTHOR_TRAILER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?mi)^co-authored-by:\s*(.+?)\s*<([^>\s]+)>\s*$").expect("co-author trailer pattern is valid")
});

/// Who wrote one commit of a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitAuthorInfo {
  /// The platform linked the commit to an account
  Handle(String),
  /// Only the git identity is known; needs a lookup
  Unresolved { email: String, name: String },
}

/// Everything the changelog needs from one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMetadata {
  pub number: u64,
  pub title: String,
  /// Label names, deduplicated, in platform order
  pub labels: Vec<String>,
  pub body: Option<String>,
  pub commits: Vec<CommitAuthorInfo>,
}

impl PullRequestMetadata {
  pub fn has_label(&self, name: &str) -> bool {
    self.labels.iter().any(|l| l == name)
  }
}

/// Fetch detail and commit list of a pull request.
///
/// Either call failing fails the whole fetch; the caller decides to skip.
pub fn fetch_pull_request(
  api: &dyn HostingApi,
  number: u64,
  include_co_authors: bool,
) -> ChangelogResult<PullRequestMetadata> {
  let detail = api.pull_request(number)?;
  let commits = api.pull_request_commits(number)?;

  let mut labels: Vec<String> = Vec::with_capacity(detail.labels.len());
  for label in detail.labels {
    if !labels.contains(&label.name) {
      labels.push(label.name);
    }
  }

  Ok(PullRequestMetadata {
    number,
    title: detail.title,
    labels,
    body: detail.body,
    commits: commit_authors(&commits, include_co_authors),
  })
}

/// Author identities of the commits, in commit order
pub fn commit_authors(commits: &[PullRequestCommit], include_co_authors: bool) -> Vec<CommitAuthorInfo> {
  let mut authors = Vec::with_capacity(commits.len());
  for commit in commits {
    match &commit.author {
      Some(account) => authors.push(CommitAuthorInfo::Handle(account.login.clone())),
      None => authors.push(CommitAuthorInfo::Unresolved {
        email: commit.commit.author.email.clone(),
        name: commit.commit.author.name.clone(),
      }),
    }

    if include_co_authors {
      authors.extend(co_authors(&commit.commit.message));
    }
  }
  authors
}

/// `Co-authored-by: Name <email>` trailers of a commit message
pub fn co_authors(message: &str) -> Vec<CommitAuthorInfo> {
  CO_AUTHOR_TRAILER
    .captures_iter(message)
    .map(|c| CommitAuthorInfo::Unresolved {
      name: c[1].to_string(),
      email: c[2].to_string(),
    })
    .collect()
}
