//! Integration tests for changelog-drafter
//!
//! Each test builds a temporary git repository and runs the compiled binary
//! against it. Histories contain no pull request references, so no test
//! touches the network.

mod helpers;
mod test_generate;
