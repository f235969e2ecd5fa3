//! Tests for the generate command

use crate::helpers::*;
use anyhow::Result;

/// Two tagged releases with a few commits that carry no pull request references
fn release_repo() -> Result<TestRepo> {
  let repo = TestRepo::new()?;
  repo.tag("jenkins-1.1")?;
  repo.commit_at("Fix typo in README", "2019-04-10T12:00:00")?;
  repo.commit_at("Bump version to 1.2", "2019-04-14T09:30:00")?;
  repo.tag("jenkins-1.2")?;
  Ok(repo)
}

fn first_document(yaml: &str) -> Result<serde_yaml::Value> {
  let docs: Vec<serde_yaml::Value> = serde_yaml::from_str(yaml)?;
  assert_eq!(docs.len(), 1, "expected a single release document:\n{}", yaml);
  Ok(docs.into_iter().next().unwrap_or_default())
}

#[test]
fn test_outside_clone_prints_usage() -> Result<()> {
  let repo = TestRepo::bare()?;

  let output = run_drafter(&repo.path, &["2.174"], &[])?;

  assert!(output.status.success());
  let out = stdout(&output);
  assert!(out.starts_with("Usage:"), "stdout: {}", out);
  assert!(out.contains("jenkinsci/jenkins clone"), "stdout: {}", out);
  Ok(())
}

#[test]
fn test_missing_argument_prints_usage() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_drafter(&repo.path, &[], &[])?;

  assert!(output.status.success());
  let out = stdout(&output);
  assert!(out.contains("Missing argument <versions>"), "stdout: {}", out);
  assert!(out.contains("jenkins-2.174..master"), "stdout: {}", out);
  Ok(())
}

#[test]
fn test_range_without_pull_requests() -> Result<()> {
  let repo = release_repo()?;

  let output = run_drafter(&repo.path, &["jenkins-1.1..jenkins-1.2"], &[])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let doc = first_document(&stdout(&output))?;
  assert_eq!(doc["version"].as_str(), Some("1.2"));
  assert_eq!(doc["date"].as_str(), Some("2019-04-14"));
  assert!(doc["changes"].as_sequence().is_some_and(|c| c.is_empty()));

  let err = stderr(&output);
  assert!(err.contains("Checking range from jenkins-1.1 to jenkins-1.2"), "stderr: {}", err);
  assert!(err.contains("No PR found for"), "stderr: {}", err);
  assert!(err.contains("<<<<<Fix typo in README>>>>>"), "stderr: {}", err);
  Ok(())
}

#[test]
fn test_bare_version_uses_previous_release() -> Result<()> {
  let repo = release_repo()?;

  let output = run_drafter(&repo.path, &["1.2"], &[])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let doc = first_document(&stdout(&output))?;
  assert_eq!(doc["version"].as_str(), Some("1.2"));
  assert!(stderr(&output).contains("from jenkins-1.1 to jenkins-1.2"));
  Ok(())
}

#[test]
fn test_output_path_receives_same_yaml() -> Result<()> {
  let repo = release_repo()?;
  let target = repo.path.join("out").join("changelog.yml");
  std::fs::create_dir_all(target.parent().unwrap())?;
  let target_str = target.to_string_lossy().to_string();

  let output = run_drafter(
    &repo.path,
    &["jenkins-1.1..jenkins-1.2"],
    &[("CHANGELOG_YAML_PATH", target_str.as_str())],
  )?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let written = std::fs::read_to_string(&target)?;
  assert_eq!(written, stdout(&output));
  assert!(stderr(&output).contains("Writing changelog to"));
  Ok(())
}

#[test]
fn test_unknown_revision_is_a_git_failure() -> Result<()> {
  let repo = release_repo()?;

  let output = run_drafter(&repo.path, &["jenkins-1.1..no-such-tag"], &[])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Git command failed"), "stderr: {}", stderr(&output));
  assert!(stdout(&output).is_empty());
  Ok(())
}

#[test]
fn test_version_without_predecessor_is_rejected() -> Result<()> {
  let repo = release_repo()?;

  let output = run_drafter(&repo.path, &["3.0"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).is_empty());
  Ok(())
}

#[test]
fn test_config_file_overrides_marker_and_prefix() -> Result<()> {
  let repo = TestRepo::bare()?;
  repo.write_file(
    "changelog.toml",
    "[github]\nowner = \"acme\"\nrepo = \"widgets\"\n\n[repository]\nmarker_file = \"WIDGETS\"\ntag_prefix = \"v\"\n",
  )?;

  // Marker missing: usage names the configured repository
  let output = run_drafter(&repo.path, &["1.1"], &[])?;
  assert!(output.status.success());
  assert!(stdout(&output).contains("acme/widgets clone"));

  repo.write_file("WIDGETS", "")?;
  repo.commit_at("Initial commit", "2020-01-01T00:00:00")?;
  repo.tag("v1.0")?;
  repo.commit_at("Tidy build script", "2020-02-02T00:00:00")?;
  repo.tag("v1.1")?;

  let output = run_drafter(&repo.path, &["1.1"], &[])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let doc = first_document(&stdout(&output))?;
  assert_eq!(doc["version"].as_str(), Some("1.1"));
  assert_eq!(doc["date"].as_str(), Some("2020-02-02"));
  Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("changelog.toml", "[github]\napi_url = \"ftp://example.com\"\n")?;

  let output = run_drafter(&repo.path, &["1.2"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("api_url"), "stderr: {}", stderr(&output));
  Ok(())
}
