use crate::core::error::{ChangelogError, ChangelogResult, ConfigError, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding hosting API credentials
pub const AUTH_ENV: &str = "GITHUB_AUTH";

/// Environment variable naming the file the rendered changelog is written to
pub const OUTPUT_PATH_ENV: &str = "CHANGELOG_YAML_PATH";

/// Configuration for changelog-drafter
/// Searched in order: changelog.toml, .changelog.toml, .config/changelog.toml
///
/// Every table is optional; a repository without any config file gets the
/// defaults for the Jenkins core repository.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChangelogConfig {
  #[serde(default)]
  pub github: GithubConfig,
  #[serde(default)]
  pub repository: RepositoryConfig,
  #[serde(default)]
  pub authors: AuthorsConfig,
}

/// Where pull requests live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GithubConfig {
  #[serde(default = "default_owner")]
  pub owner: String,

  #[serde(default = "default_repo")]
  pub repo: String,

  /// REST API root (GitHub Enterprise installs use `https://host/api/v3`)
  #[serde(default = "default_api_url")]
  pub api_url: String,
}

fn default_owner() -> String {
  "jenkinsci".to_string()
}

fn default_repo() -> String {
  "jenkins".to_string()
}

fn default_api_url() -> String {
  "https://api.github.com".to_string()
}

impl Default for GithubConfig {
  fn default() -> Self {
    Self {
      owner: default_owner(),
      repo: default_repo(),
      api_url: default_api_url(),
    }
  }
}

/// Conventions of the local clone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryConfig {
  /// File that must exist in the working directory (proves we run in the right clone)
  #[serde(default = "default_marker_file")]
  pub marker_file: PathBuf,

  /// Prefix turning a bare version into a release tag (`2.174` -> `jenkins-2.174`)
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,

  /// Issue tracker key searched for in commit messages (`JENKINS-12345`)
  #[serde(default = "default_issue_key")]
  pub issue_key: String,
}

fn default_marker_file() -> PathBuf {
  PathBuf::from("licenseCompleter.groovy")
}

fn default_tag_prefix() -> String {
  "jenkins-".to_string()
}

fn default_issue_key() -> String {
  "JENKINS".to_string()
}

impl Default for RepositoryConfig {
  fn default() -> Self {
    Self {
      marker_file: default_marker_file(),
      tag_prefix: default_tag_prefix(),
      issue_key: default_issue_key(),
    }
  }
}

/// Author resolution knobs
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthorsConfig {
  /// Also credit `Co-authored-by:` trailers found in pull request commits
  #[serde(default)]
  pub include_co_authors: bool,
}

impl ChangelogConfig {
  /// Find config file in search order: changelog.toml, .changelog.toml, .config/changelog.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("changelog.toml"),
      path.join(".changelog.toml"),
      path.join(".config").join("changelog.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the first candidate file, or defaults when there is none
  pub fn load(path: &Path) -> ChangelogResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ChangelogConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ChangelogError::Config(ConfigError::Parse {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    config.validate()?;
    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> ChangelogResult<()> {
    if self.github.owner.trim().is_empty() {
      return Err(invalid("github.owner", "must not be empty"));
    }
    if self.github.repo.trim().is_empty() {
      return Err(invalid("github.repo", "must not be empty"));
    }
    if !(self.github.api_url.starts_with("https://") || self.github.api_url.starts_with("http://")) {
      return Err(invalid(
        "github.api_url",
        &format!("'{}' is not an http(s) URL", self.github.api_url),
      ));
    }
    if self.repository.issue_key.is_empty() || !self.repository.issue_key.chars().all(|c| c.is_ascii_alphanumeric()) {
      return Err(invalid(
        "repository.issue_key",
        &format!("'{}' must be a non-empty alphanumeric key", self.repository.issue_key),
      ));
    }
    Ok(())
  }

  /// Base URL of the repository endpoints (`{api}/repos/{owner}/{repo}`)
  pub fn repo_api_url(&self) -> String {
    format!(
      "{}/repos/{}/{}",
      self.github.api_url.trim_end_matches('/'),
      self.github.owner,
      self.github.repo
    )
  }
}

fn invalid(field: &str, reason: &str) -> ChangelogError {
  ChangelogError::Config(ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}

/// Hosting API credentials taken from `GITHUB_AUTH`
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
  /// `user:token`, sent as HTTP basic auth
  Basic { user: String, password: String },
  /// A bare token, sent as a bearer token
  Token(String),
}

impl Credentials {
  /// Interpret a raw `GITHUB_AUTH` value; blank values mean no credentials
  pub fn parse(raw: &str) -> Option<Self> {
    let raw = raw.trim();
    if raw.is_empty() {
      return None;
    }
    match raw.split_once(':') {
      Some((user, password)) => Some(Credentials::Basic {
        user: user.to_string(),
        password: password.to_string(),
      }),
      None => Some(Credentials::Token(raw.to_string())),
    }
  }

  /// Read credentials from the environment
  pub fn from_env() -> Option<Self> {
    std::env::var(AUTH_ENV).ok().and_then(|raw| Self::parse(&raw))
  }
}

// Never print secrets
impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Credentials::Basic { user, .. } => write!(f, "Basic({}:***)", user),
      Credentials::Token(_) => write!(f, "Token(***)"),
    }
  }
}

/// Output file requested through `CHANGELOG_YAML_PATH`, if any
pub fn output_path_from_env() -> Option<PathBuf> {
  std::env::var_os(OUTPUT_PATH_ENV)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
}
