//! The one command: draft the changelog for a version or revision range

use crate::changelog::{ChangelogPipeline, PipelineOptions, render};
use crate::core::config::{ChangelogConfig, Credentials, OUTPUT_PATH_ENV, output_path_from_env};
use crate::core::error::{ChangelogResult, ResultExt};
use crate::core::range::RevisionRange;
use crate::core::vcs::SystemGit;
use crate::github::GithubClient;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const BIN: &str = env!("CARGO_PKG_NAME");

/// Run the generate command
///
/// Missing preconditions print usage and return `Ok`: there is nothing to
/// report as an error, the tool was just pointed at the wrong place.
pub fn run_generate(versions: Option<String>) -> ChangelogResult<()> {
  let workspace_root = env::current_dir()?;
  let config = ChangelogConfig::load(&workspace_root)?;

  if !workspace_root.join(&config.repository.marker_file).exists() {
    print!("{}", wrong_directory_usage(&config));
    return Ok(());
  }

  let Some(versions) = versions else {
    print!("{}", missing_argument_usage(&config));
    return Ok(());
  };

  let range = RevisionRange::resolve(&versions, &config.repository.tag_prefix)?;

  let git = SystemGit::open(&workspace_root)?;
  debug!("Using repository at {}", git.work_tree().display());

  let credentials = Credentials::from_env();
  if credentials.is_none() {
    warn!("GITHUB_AUTH is not set; GitHub API calls are unauthenticated and heavily rate limited");
  }
  let client = GithubClient::new(&config, credentials)?;

  let options = PipelineOptions {
    tag_prefix: config.repository.tag_prefix.clone(),
    issue_key: config.repository.issue_key.clone(),
    include_co_authors: config.authors.include_co_authors,
  };
  let draft = ChangelogPipeline::new(&git, &client, options).run(&range)?;
  let yaml = render(&draft.document, &draft.aggregate.hidden)?;

  print!("{}", yaml);

  if let Some(path) = output_path_from_env() {
    write_changelog(&path, &yaml)?;
  }

  Ok(())
}

fn write_changelog(path: &Path, yaml: &str) -> ChangelogResult<()> {
  info!("Writing changelog to {}", path.display());
  fs::write(path, yaml).with_context(|| {
    format!(
      "Failed to write changelog to {} (from {})",
      path.display(),
      OUTPUT_PATH_ENV
    )
  })
}

fn usage_header() -> String {
  format!("Usage:    {} <versions>\n\n", BIN)
}

fn wrong_directory_usage(config: &ChangelogConfig) -> String {
  format!(
    "{}This tool needs to be run from a {}/{} clone (no {} found in the current directory).\n",
    usage_header(),
    config.github.owner,
    config.github.repo,
    config.repository.marker_file.display()
  )
}

fn missing_argument_usage(config: &ChangelogConfig) -> String {
  let prefix = &config.repository.tag_prefix;
  format!(
    "{header}Missing argument <versions>\n\
     To generate the changelog between two commits or tags, specify them with '..' separator:\n\
     \x20         {bin} {prefix}2.174..master\n\
     To generate the changelog for an existing release (i.e. from the previous release), specify the version number:\n\
     \x20         {bin} 2.174\n",
    header = usage_header(),
    bin = BIN,
    prefix = prefix,
  )
}
