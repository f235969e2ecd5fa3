//! Terminal-facing output helpers

pub mod logging;
