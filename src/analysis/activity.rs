//! Recent code-frequency activity.
//!
//! Sums weekly additions and deletions that fall inside a trailing window
//! ending at "now".

use crate::github::{GitHubClient, RetryPolicy, Sleeper};
use crate::models::{CodeFrequencyPoint, RecentUpdate, Repository};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// The trailing window `[now - weeks, now]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ActivityWindow {
    pub fn trailing(now: DateTime<Utc>, weeks: i64) -> Self {
        Self {
            start: now - Duration::days(weeks * 7),
            end: now,
        }
    }

    /// Whether a week starting at `instant` counts, boundary included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start
    }
}

/// Sum the points inside `window` into a [`RecentUpdate`].
///
/// Returns `None` when both sums are zero. Sums saturate at `u64::MAX`.
pub fn summarize(
    repo: &Repository,
    points: &[CodeFrequencyPoint],
    window: &ActivityWindow,
) -> Option<RecentUpdate> {
    let (additions, deletions) = points
        .iter()
        .filter(|point| point.week_start().is_some_and(|t| window.contains(t)))
        .fold((0u64, 0u64), |(adds, dels), point| {
            (
                adds.saturating_add(point.additions()),
                dels.saturating_add(point.deletions()),
            )
        });

    if additions == 0 && deletions == 0 {
        return None;
    }

    Some(RecentUpdate {
        name: repo.name.clone(),
        updated_at: repo.pushed_at.unwrap_or(window.end),
        additions,
        deletions,
    })
}

/// Fetch and summarize one repository's recent activity.
///
/// Every failure, including statistics that never finish computing,
/// degrades to "no activity" with a warning.
pub async fn fetch_activity<S: Sleeper>(
    client: &GitHubClient,
    repo: &Repository,
    account: &str,
    policy: &RetryPolicy,
    sleeper: &S,
    window: &ActivityWindow,
) -> Option<RecentUpdate> {
    let slug = repo.slug(account);

    match client.code_frequency(&slug, policy, sleeper).await {
        Ok(points) => {
            let update = summarize(repo, &points, window);
            if update.is_none() {
                debug!("{}: no changes in the last {} weeks", repo.name, window_weeks(window));
            }
            update
        }
        Err(e) => {
            warn!("{}: code frequency unavailable: {}", repo.name, e.log_safe());
            None
        }
    }
}

fn window_weeks(window: &ActivityWindow) -> i64 {
    (window.end - window.start).num_weeks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn create_test_repo(pushed_at: Option<DateTime<Utc>>) -> Repository {
        Repository {
            name: "widget".to_string(),
            full_name: "octocat/widget".to_string(),
            languages_url: None,
            pushed_at,
        }
    }

    fn point_at(instant: DateTime<Utc>, additions: i64, deletions: i64) -> CodeFrequencyPoint {
        CodeFrequencyPoint(instant.timestamp(), additions, deletions)
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let window = ActivityWindow::trailing(now(), 6);
        assert!(window.contains(now() - Duration::days(42)));
        assert!(!window.contains(now() - Duration::days(43)));
        assert!(!window.contains(now() - Duration::days(42) - Duration::seconds(1)));
    }

    #[test]
    fn test_summarize_counts_boundary_week_only() {
        let window = ActivityWindow::trailing(now(), 6);
        let pushed = Utc.with_ymd_and_hms(2024, 6, 10, 8, 30, 0).unwrap();
        let points = vec![
            point_at(now() - Duration::days(43), 1000, -1000),
            point_at(now() - Duration::days(42), 10, -4),
            point_at(now() - Duration::days(7), 5, 0),
        ];

        let update = summarize(&create_test_repo(Some(pushed)), &points, &window).unwrap();

        assert_eq!(update.name, "widget");
        assert_eq!(update.additions, 15);
        assert_eq!(update.deletions, 4);
        assert_eq!(update.updated_at, pushed);
    }

    #[test]
    fn test_summarize_zero_activity_is_omitted() {
        let window = ActivityWindow::trailing(now(), 6);
        let points = vec![
            point_at(now() - Duration::days(14), 0, 0),
            point_at(now() - Duration::days(7), 0, 0),
            point_at(now() - Duration::days(100), 50, -20),
        ];

        assert!(summarize(&create_test_repo(None), &points, &window).is_none());
    }

    #[test]
    fn test_summarize_deletions_only() {
        let window = ActivityWindow::trailing(now(), 6);
        let points = vec![point_at(now() - Duration::days(3), 0, -12)];

        let update = summarize(&create_test_repo(None), &points, &window).unwrap();
        assert_eq!(update.additions, 0);
        assert_eq!(update.deletions, 12);
        assert_eq!(update.updated_at, now());
    }

    #[test]
    fn test_summarize_saturates_huge_counts() {
        let window = ActivityWindow::trailing(now(), 6);
        let point = point_at(now() - Duration::days(1), i64::MAX, i64::MIN);
        let points = vec![point, point, point];

        let update = summarize(&create_test_repo(None), &points, &window).unwrap();
        assert_eq!(update.additions, u64::MAX);
        assert_eq!(update.deletions, u64::MAX);
    }

    #[test]
    fn test_window_weeks() {
        assert_eq!(window_weeks(&ActivityWindow::trailing(now(), 6)), 6);
    }
}
