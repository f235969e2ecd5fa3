//! In-memory hosting API for unit tests

use super::HostingApi;
use super::models::{Account, GitCommit, GitSignature, Label, PullRequest, PullRequestCommit};
use crate::core::error::{ApiError, ChangelogError, ChangelogResult};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct FakeApi {
  pulls: HashMap<u64, PullRequest>,
  commits: HashMap<u64, Vec<PullRequestCommit>>,
  users: HashMap<String, Vec<Account>>,
  failing_commits: HashSet<u64>,
  failing_searches: HashSet<String>,
  /// Every call, in order (`pull 1`, `commits 1`, `search a@b`)
  pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
  pub fn pull(mut self, number: u64, title: &str, labels: &[&str], body: Option<&str>) -> Self {
    self.pulls.insert(
      number,
      PullRequest {
        number,
        title: title.to_string(),
        body: body.map(str::to_string),
        labels: labels.iter().map(|l| Label { name: l.to_string() }).collect(),
      },
    );
    self.commits.entry(number).or_default();
    self
  }

  pub fn linked_commit(mut self, number: u64, login: &str) -> Self {
    self.commits.entry(number).or_default().push(PullRequestCommit {
      author: Some(Account {
        login: login.to_string(),
      }),
      commit: GitCommit {
        author: GitSignature {
          name: login.to_string(),
          email: format!("{}@users.noreply.github.com", login),
        },
        message: String::new(),
      },
    });
    self
  }

  pub fn unlinked_commit(mut self, number: u64, name: &str, email: &str) -> Self {
    self.commits.entry(number).or_default().push(PullRequestCommit {
      author: None,
      commit: GitCommit {
        author: GitSignature {
          name: name.to_string(),
          email: email.to_string(),
        },
        message: String::new(),
      },
    });
    self
  }

  pub fn user(mut self, email: &str, login: &str) -> Self {
    self.users.entry(email.to_string()).or_default().push(Account {
      login: login.to_string(),
    });
    self
  }

  pub fn failing_commits(mut self, number: u64) -> Self {
    self.failing_commits.insert(number);
    self
  }

  pub fn failing_search(mut self, email: &str) -> Self {
    self.failing_searches.insert(email.to_string());
    self
  }

  pub fn search_calls(&self) -> Vec<String> {
    self
      .calls
      .borrow()
      .iter()
      .filter(|c| c.starts_with("search "))
      .cloned()
      .collect()
  }

  fn status(url: String, status: u16) -> ChangelogError {
    ChangelogError::Api(ApiError::Status { url, status })
  }
}

impl HostingApi for FakeApi {
  fn pull_request(&self, number: u64) -> ChangelogResult<PullRequest> {
    self.calls.borrow_mut().push(format!("pull {}", number));
    self
      .pulls
      .get(&number)
      .cloned()
      .ok_or_else(|| Self::status(format!("pulls/{}", number), 404))
  }

  fn pull_request_commits(&self, number: u64) -> ChangelogResult<Vec<PullRequestCommit>> {
    self.calls.borrow_mut().push(format!("commits {}", number));
    if self.failing_commits.contains(&number) {
      return Err(Self::status(format!("pulls/{}/commits", number), 502));
    }
    self
      .commits
      .get(&number)
      .cloned()
      .ok_or_else(|| Self::status(format!("pulls/{}/commits", number), 404))
  }

  fn search_users_by_email(&self, email: &str) -> ChangelogResult<Vec<Account>> {
    self.calls.borrow_mut().push(format!("search {}", email));
    if self.failing_searches.contains(email) {
      return Err(Self::status("search/users".to_string(), 422));
    }
    Ok(self.users.get(email).cloned().unwrap_or_default())
  }
}
