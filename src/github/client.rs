//! Blocking GitHub REST client
//!
//! One request per call, no retries, no pagination: the first page of every
//! listing is all the changelog looks at.

use super::models::{Account, PullRequest, PullRequestCommit, UserSearch};
use crate::core::config::{ChangelogConfig, Credentials};
use crate::core::error::{ApiError, ChangelogError, ChangelogResult, ResultExt};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;

/// The three read endpoints the changelog consumes
pub trait HostingApi {
  /// Pull request detail (title, labels, body)
  fn pull_request(&self, number: u64) -> ChangelogResult<PullRequest>;

  /// Commits that make up a pull request
  fn pull_request_commits(&self, number: u64) -> ChangelogResult<Vec<PullRequestCommit>>;

  /// Accounts whose public email matches `email`, best match first
  fn search_users_by_email(&self, email: &str) -> ChangelogResult<Vec<Account>>;
}

/// GitHub API client bound to one repository
pub struct GithubClient {
  http: Client,
  api_url: String,
  repo_url: String,
  credentials: Option<Credentials>,
}

impl GithubClient {
  pub fn new(config: &ChangelogConfig, credentials: Option<Credentials>) -> ChangelogResult<Self> {
    let http = Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      api_url: config.github.api_url.trim_end_matches('/').to_string(),
      repo_url: config.repo_api_url(),
      credentials,
    })
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.credentials {
      Some(Credentials::Basic { user, password }) => request.basic_auth(user, Some(password)),
      Some(Credentials::Token(token)) => request.bearer_auth(token),
      None => request,
    }
  }

  fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ChangelogResult<T> {
    let request = self
      .authorize(request)
      .header(ACCEPT, "application/vnd.github+json")
      .header("X-GitHub-Api-Version", "2022-11-28");

    let response = request.send()?;
    let url = response.url().to_string();
    let status = response.status();
    debug!("GET {} -> {}", url, status);

    if !status.is_success() {
      return Err(ChangelogError::Api(ApiError::Status {
        url,
        status: status.as_u16(),
      }));
    }

    let body = response.bytes()?;
    decode(url, &body)
  }
}

fn decode<T: DeserializeOwned>(url: String, body: &[u8]) -> ChangelogResult<T> {
  serde_json::from_slice(body).map_err(|e| {
    ChangelogError::Api(ApiError::Decode {
      url,
      reason: e.to_string(),
    })
  })
}

impl HostingApi for GithubClient {
  fn pull_request(&self, number: u64) -> ChangelogResult<PullRequest> {
    let url = format!("{}/pulls/{}", self.repo_url, number);
    self.get_json(self.http.get(url))
  }

  fn pull_request_commits(&self, number: u64) -> ChangelogResult<Vec<PullRequestCommit>> {
    let url = format!("{}/pulls/{}/commits", self.repo_url, number);
    self.get_json(self.http.get(url))
  }

  fn search_users_by_email(&self, email: &str) -> ChangelogResult<Vec<Account>> {
    let url = format!("{}/search/users", self.api_url);
    let query = format!("{} in:email", email);
    let search: UserSearch = self.get_json(self.http.get(url).query(&[("q", query.as_str())]))?;
    Ok(search.items)
  }
}
