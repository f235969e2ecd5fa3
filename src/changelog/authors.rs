//! Commit author -> platform handle resolution

use super::pull::CommitAuthorInfo;
use crate::github::HostingApi;
use tracing::{info, warn};

/// Resolve the authors of a pull request to handles.
///
/// Linked accounts are taken as-is. Every distinct unlinked email is looked up
/// once through the user search; the first hit wins, a miss (or a failed
/// search) becomes `TODO: {name} ({email})` for a human to fill in. The result
/// keeps first-seen order without duplicates: linked handles in commit order,
/// then lookups in order of first appearance.
pub fn resolve_authors(api: &dyn HostingApi, commits: &[CommitAuthorInfo]) -> Vec<String> {
  let mut authors: Vec<String> = Vec::new();
  // (email, name) in first-seen order; the name of the last commit with that email is kept
  let mut deferred: Vec<(String, String)> = Vec::new();

  for info in commits {
    match info {
      CommitAuthorInfo::Handle(login) => authors.push(login.clone()),
      CommitAuthorInfo::Unresolved { email, name } => match deferred.iter_mut().find(|(e, _)| e == email) {
        Some(entry) => entry.1 = name.clone(),
        None => deferred.push((email.clone(), name.clone())),
      },
    }
  }

  for (email, name) in deferred {
    info!("Resolving GitHub ID for {} ({})", name, email);
    let handle = match api.search_users_by_email(&email) {
      Ok(accounts) => accounts.into_iter().next().map(|a| a.login),
      Err(e) => {
        warn!("User search for {} failed: {}", email, e);
        None
      }
    };
    authors.push(handle.unwrap_or_else(|| placeholder(&name, &email)));
  }

  dedup_preserving_order(authors)
}

/// Author entry left for manual follow-up
pub fn placeholder(name: &str, email: &str) -> String {
  format!("TODO: {} ({})", name, email)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
  let mut seen = Vec::with_capacity(items.len());
  for item in items {
    if !seen.contains(&item) {
      seen.push(item);
    }
  }
  seen
}
