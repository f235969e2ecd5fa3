//! Error types for changelog-drafter with contextual messages and exit codes
//!
//! Only run-level failures live here. Per-pull-request problems (a failed
//! fetch, an unknown author) are handled where they happen and never reach
//! `main`; see `changelog::pipeline`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for changelog-drafter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for changelog-drafter
#[derive(Debug)]
pub enum ChangelogError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Hosting API errors
  Api(ApiError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ChangelogError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ChangelogError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ChangelogError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ChangelogError::Message { message, context, help } => ChangelogError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ChangelogError::Io(e) => ChangelogError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ChangelogError::Config(_) => ExitCode::User,
      ChangelogError::Git(_) => ExitCode::System,
      ChangelogError::Api(_) => ExitCode::System,
      ChangelogError::Io(_) => ExitCode::System,
      ChangelogError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ChangelogError::Config(e) => e.help_message(),
      ChangelogError::Git(e) => e.help_message(),
      ChangelogError::Api(e) => e.help_message(),
      ChangelogError::Message { help, .. } => help.clone(),
      ChangelogError::Io(_) => None,
    }
  }
}

impl fmt::Display for ChangelogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChangelogError::Config(e) => write!(f, "{}", e),
      ChangelogError::Git(e) => write!(f, "{}", e),
      ChangelogError::Api(e) => write!(f, "{}", e),
      ChangelogError::Io(e) => write!(f, "I/O error: {}", e),
      ChangelogError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ChangelogError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ChangelogError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ChangelogError {
  fn from(err: io::Error) -> Self {
    ChangelogError::Io(err)
  }
}

impl From<String> for ChangelogError {
  fn from(msg: String) -> Self {
    ChangelogError::message(msg)
  }
}

impl From<&str> for ChangelogError {
  fn from(msg: &str) -> Self {
    ChangelogError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ChangelogError {
  fn from(err: toml_edit::de::Error) -> Self {
    ChangelogError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_yaml::Error> for ChangelogError {
  fn from(err: serde_yaml::Error) -> Self {
    ChangelogError::message(format!("YAML error: {}", err))
  }
}

impl From<chrono::ParseError> for ChangelogError {
  fn from(err: chrono::ParseError) -> Self {
    ChangelogError::message(format!("Date parse error: {}", err))
  }
}

impl From<reqwest::Error> for ChangelogError {
  fn from(err: reqwest::Error) -> Self {
    let url = err.url().map(|u| u.to_string()).unwrap_or_default();
    if err.is_decode() {
      ChangelogError::Api(ApiError::Decode {
        url,
        reason: err.to_string(),
      })
    } else {
      ChangelogError::Api(ApiError::Request {
        url,
        reason: err.to_string(),
      })
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but holds an unusable value
  InvalidValue { field: String, reason: String },

  /// Config file could not be parsed
  Parse { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidValue { field, .. } => Some(format!(
        "Fix `{}` in changelog.toml or remove it to use the default.",
        field
      )),
      ConfigError::Parse { .. } => {
        Some("changelog.toml must be valid TOML with [github], [repository] and [authors] tables.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid configuration value for {}: {}", field, reason)
      }
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse {}: {}", path.display(), reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Git printed something we could not interpret
  UnexpectedOutput { command: String, output: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::CommandFailed { stderr, .. } => {
        if stderr.contains("unknown revision") || stderr.contains("bad revision") {
          Some("Check that both revisions exist locally. Run `git fetch --tags` if a release tag is missing.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run the tool from a clone of the project: {}",
        path.display()
      )),
      GitError::UnexpectedOutput { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::UnexpectedOutput { command, output } => {
        write!(f, "Unexpected output from {}: {}", command, output)
      }
    }
  }
}

/// Hosting API errors
#[derive(Debug)]
pub enum ApiError {
  /// Transport-level failure (DNS, TLS, connection reset)
  Request { url: String, reason: String },

  /// Server answered with a non-success status
  Status { url: String, status: u16 },

  /// Response body was not the JSON we expected
  Decode { url: String, reason: String },
}

impl ApiError {
  fn help_message(&self) -> Option<String> {
    match self {
      ApiError::Status { status: 401, .. } | ApiError::Status { status: 403, .. } => Some(
        "Set GITHUB_AUTH to `user:token` (or a bare token) with read access. Unauthenticated calls are rate limited."
          .to_string(),
      ),
      ApiError::Status { status: 404, .. } => {
        Some("Check [github] owner/repo in changelog.toml.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Request { url, reason } => write!(f, "Request to {} failed: {}", url, reason),
      ApiError::Status { url, status } => write!(f, "{} returned HTTP {}", url, status),
      ApiError::Decode { url, reason } => write!(f, "Could not decode response from {}: {}", url, reason),
    }
  }
}

/// Result type alias for changelog-drafter
pub type ChangelogResult<T> = Result<T, ChangelogError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ChangelogResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ChangelogResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ChangelogError>,
{
  fn context(self, ctx: impl Into<String>) -> ChangelogResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ChangelogResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ChangelogError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
