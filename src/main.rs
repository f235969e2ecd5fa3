mod changelog;
mod commands;
mod core;
mod github;
mod ui;

use clap::Parser;
use crate::core::error::{ChangelogError, print_error};

/// Draft a release changelog from git history and pull request metadata
///
/// Scans the commits of a release, looks up the pull requests they came
/// from and prints a YAML changelog draft for manual review.
///
/// Environment:
///   GITHUB_AUTH           user:token or a bare token for the GitHub API
///   CHANGELOG_YAML_PATH   also write the draft to this file
#[derive(Parser)]
#[command(name = "changelog-drafter")]
#[command(version, about, long_about, verbatim_doc_comment)]
#[command(styles = get_styles())]
struct Cli {
  /// Release version (e.g. 2.174) or revision range (e.g. jenkins-2.174..master)
  versions: Option<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  ui::logging::init_logging(tracing::Level::INFO);

  if let Err(err) = commands::run_generate(cli.versions) {
    handle_error(err);
  }
}

fn handle_error(err: ChangelogError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
