//! Wire types for the GitHub REST v3 payloads we read
//!
//! Only the fields the changelog needs are declared; serde ignores the rest.

use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/pulls/{number}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Label {
  pub name: String,
}

/// One element of `GET /repos/{owner}/{repo}/pulls/{number}/commits`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PullRequestCommit {
  /// Platform account linked to the commit author; `null` when the email is unknown
  #[serde(default)]
  pub author: Option<Account>,
  pub commit: GitCommit,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GitCommit {
  pub author: GitSignature,
  #[serde(default)]
  pub message: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GitSignature {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Account {
  pub login: String,
}

/// `GET /search/users`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserSearch {
  #[serde(default)]
  pub items: Vec<Account>,
}
