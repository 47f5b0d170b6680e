//! Statistics collection.
//!
//! Lists the account's repositories, drops excluded ones, and gathers
//! language and activity data for the rest into a [`Report`].

pub mod activity;
pub mod aggregator;

pub use activity::{fetch_activity, summarize, ActivityWindow};
pub use aggregator::{aggregate_languages, exclude_repos, fetch_languages};

use crate::github::{GitHubClient, RetryPolicy, Sleeper};
use crate::models::{LanguageBreakdown, RecentUpdate, Report, Repository};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use tracing::{error, info};

/// Everything one collection pass needs.
pub struct StatsCollector<'a, S> {
    pub client: &'a GitHubClient,
    pub account: String,
    pub excluded: HashSet<String>,
    pub policy: RetryPolicy,
    pub sleeper: S,
    pub window: ActivityWindow,
    /// Repositories fetched at once. Results are folded in listing order.
    pub concurrency: usize,
    pub show_progress: bool,
}

impl<'a, S: Sleeper> StatsCollector<'a, S> {
    /// List repositories, degrading to an empty list on any failure.
    pub async fn list_repositories(&self) -> Vec<Repository> {
        match self.client.list_repos(&self.account).await {
            Ok(repos) => {
                info!("Found {} repositories for {}", repos.len(), self.account);
                repos
            }
            Err(e) => {
                error!("Failed to list repositories for {}: {}", self.account, e.log_safe());
                Vec::new()
            }
        }
    }

    /// Run one full pass and build the report.
    pub async fn collect(&self) -> Report {
        let repos = exclude_repos(self.list_repositories().await, &self.excluded);
        info!("Collecting stats for {} repositories", repos.len());

        let progress = self.progress_bar(repos.len() as u64);

        let results: Vec<(Option<LanguageBreakdown>, Option<RecentUpdate>)> =
            stream::iter(repos.iter())
                .map(|repo| {
                    let progress = &progress;
                    async move {
                        let result = self.collect_repo(repo).await;
                        progress.inc(1);
                        result
                    }
                })
                .buffered(self.concurrency.max(1))
                .collect()
                .await;

        progress.finish_and_clear();

        let mut breakdowns = Vec::with_capacity(results.len());
        let mut updates = Vec::new();
        for (breakdown, update) in results {
            breakdowns.extend(breakdown);
            updates.extend(update);
        }

        let stats = aggregate_languages(breakdowns);
        info!(
            "Aggregated {} languages ({} bytes), {} recently updated repositories",
            stats.len(),
            stats.total(),
            updates.len()
        );

        Report::new(&stats, updates)
    }

    async fn collect_repo(
        &self,
        repo: &Repository,
    ) -> (Option<LanguageBreakdown>, Option<RecentUpdate>) {
        let breakdown = fetch_languages(self.client, repo).await;
        let update = fetch_activity(
            self.client,
            repo,
            &self.account,
            &self.policy,
            &self.sleeper,
            &self.window,
        )
        .await;
        (breakdown, update)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
