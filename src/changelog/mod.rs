//! Changelog drafting from commits and pull requests
//!
//! - **references**: pull request / issue numbers inside commit messages
//! - **pull**: pull request metadata and commit author identities
//! - **authors**: author handle resolution with user search fallback
//! - **classify**: label -> type, proposed changelog extraction
//! - **entry**: changelog entries, visible/hidden aggregation and ordering
//! - **render**: YAML output with hidden entries as comments
//! - **pipeline**: the sequential run tying it together

pub mod authors;
pub mod classify;
pub mod entry;
pub mod pipeline;
pub mod pull;
pub mod references;
pub mod render;

pub use pipeline::{ChangelogPipeline, PipelineOptions};
pub use render::render;
