//! CLI commands for changelog-drafter
//!
//! - **generate**: draft the changelog for a release version or revision range

pub mod generate;

pub use generate::run_generate;
