//! GitHub as the hosting platform: REST client and payload types

pub mod client;
pub mod models;

pub use client::{GithubClient, HostingApi};

#[cfg(test)]
pub(crate) mod testing;
