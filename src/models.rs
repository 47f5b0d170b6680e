//! Data models for the README statistics.
//!
//! This module contains the GitHub API payloads we consume and the
//! aggregated values that feed the report renderer.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// A repository as returned by `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name (unique per account).
    pub name: String,
    /// `owner/name`, used to address the stats endpoints.
    #[serde(default)]
    pub full_name: String,
    /// URL of the language breakdown resource.
    #[serde(default)]
    pub languages_url: Option<String>,
    /// Last push time. GitHub reports `null` for empty repositories.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// The `owner/name` slug, falling back to the listed account.
    pub fn slug(&self, account: &str) -> String {
        if self.full_name.is_empty() {
            format!("{}/{}", account, self.name)
        } else {
            self.full_name.clone()
        }
    }
}

/// One week of the code-frequency series: `[week, additions, deletions]`.
///
/// GitHub reports deletions as a non-positive number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CodeFrequencyPoint(pub i64, pub i64, pub i64);

impl CodeFrequencyPoint {
    /// Start of the week this point covers.
    pub fn week_start(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, 0).single()
    }

    pub fn additions(&self) -> u64 {
        self.1.unsigned_abs()
    }

    /// Deletions normalized to their absolute value.
    pub fn deletions(&self) -> u64 {
        self.2.unsigned_abs()
    }
}

/// One repository's `{language: bytes}` object, in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBreakdown(pub Vec<(String, u64)>);

impl<'de> Deserialize<'de> for LanguageBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = LanguageBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language names to byte counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((language, bytes)) = map.next_entry::<String, u64>()? {
                    entries.push((language, bytes));
                }
                Ok(LanguageBreakdown(entries))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Recent activity for a single repository inside the trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentUpdate {
    pub name: String,
    pub updated_at: DateTime<Utc>,
    pub additions: u64,
    pub deletions: u64,
}

/// Cumulative bytes per language, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageStats {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl LanguageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bytes` to `language`, registering it on first sight.
    ///
    /// Counts saturate at `u64::MAX`.
    pub fn add(&mut self, language: &str, bytes: u64) {
        match self.index.get(language) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(bytes),
            None => {
                self.index.insert(language.to_string(), self.entries.len());
                self.entries.push((language.to_string(), bytes));
            }
        }
    }

    /// Merge one repository's breakdown, keeping its order for new languages.
    pub fn merge(&mut self, breakdown: &LanguageBreakdown) {
        for (language, bytes) in &breakdown.0 {
            self.add(language, *bytes);
        }
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.index.get(language).map(|&i| self.entries[i].1)
    }

    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |total, (_, bytes)| total.saturating_add(*bytes))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, b)| (l.as_str(), *b))
    }
}

/// A language's share of the total byte count.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    pub percentage: f64,
}

/// Aggregated statistics ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Languages sorted by descending byte count.
    pub languages: Vec<LanguageShare>,
    /// Recent updates sorted by descending `updated_at`.
    pub updates: Vec<RecentUpdate>,
}

impl Report {
    /// Build a report from the raw accumulators, applying the final sorts.
    pub fn new(stats: &LanguageStats, mut updates: Vec<RecentUpdate>) -> Self {
        let total = stats.total();
        let mut languages: Vec<LanguageShare> = stats
            .iter()
            .map(|(language, bytes)| LanguageShare {
                language: language.to_string(),
                bytes,
                percentage: if total == 0 {
                    0.0
                } else {
                    bytes as f64 / total as f64 * 100.0
                },
            })
            .collect();

        // Both sorts are stable, so ties keep first-seen order.
        languages.sort_by_key(|share| std::cmp::Reverse(share.bytes));
        updates.sort_by_key(|update| std::cmp::Reverse(update.updated_at));

        Self { languages, updates }
    }
}
