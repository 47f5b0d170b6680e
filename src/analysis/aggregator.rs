//! Repository filtering and language aggregation.
//!
//! This module provides the exclusion filter applied to the repository
//! listing and the summing of per-repository language breakdowns.

use crate::github::GitHubClient;
use crate::models::{LanguageBreakdown, LanguageStats, Repository};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Drop repositories whose name is in `excluded`, keeping list order.
pub fn exclude_repos(repos: Vec<Repository>, excluded: &HashSet<String>) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| !excluded.contains(&repo.name))
        .collect()
}

/// Fetch a repository's language breakdown.
///
/// Any failure is logged and treated as "no data"; this call is never retried.
pub async fn fetch_languages(client: &GitHubClient, repo: &Repository) -> Option<LanguageBreakdown> {
    let Some(ref url) = repo.languages_url else {
        warn!("{}: no languages URL, skipping language stats", repo.name);
        return None;
    };

    match client.languages(url).await {
        Ok(breakdown) => {
            debug!("{}: {} languages", repo.name, breakdown.0.len());
            Some(breakdown)
        }
        Err(e) => {
            warn!("{}: language stats unavailable: {}", repo.name, e.log_safe());
            None
        }
    }
}

/// Sum breakdowns into one mapping, in the order they are given.
pub fn aggregate_languages<I>(breakdowns: I) -> LanguageStats
where
    I: IntoIterator<Item = LanguageBreakdown>,
{
    let mut stats = LanguageStats::new();
    for breakdown in breakdowns {
        stats.merge(&breakdown);
    }
    stats
}
