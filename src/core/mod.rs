//! Core building blocks shared by the changelog pipeline
//!
//! - **config**: optional changelog.toml plus environment-provided settings
//! - **error**: error types with contextual help messages and exit codes
//! - **range**: revision range resolution from the command-line argument
//! - **vcs**: commit log access (SystemGit)

pub mod config;
pub mod error;
pub mod range;
pub mod vcs;
