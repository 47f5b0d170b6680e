//! GitHub REST API client.
//!
//! Covers the three read-only endpoints the README needs: the account's
//! repository listing, per-repository language breakdowns, and weekly
//! code-frequency statistics.

use crate::config::{GitHubConfig, HttpConfig};
use crate::error::{Error, Result};
use crate::github::retry::{RetryPolicy, Sleeper};
use crate::models::{CodeFrequencyPoint, LanguageBreakdown, Repository};
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    per_page: u32,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(github: &GitHubConfig, http: &HttpConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("readme-stats/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        // A missing token is not an error: requests go out unauthenticated.
        if let Some(token) = github.token.as_deref().filter(|t| !t.is_empty()) {
            let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Config(format!("Invalid GitHub token: {e}")))?;
            auth_value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, auth_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: github.api_url.trim_end_matches('/').to_string(),
            per_page: github.per_page,
        })
    }

    async fn send(&self, url: &str) -> Result<Response> {
        debug!("GitHub API request: GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// List the account's repositories (first page only).
    pub async fn list_repos(&self, user: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?per_page={}",
            self.api_url, user, self.per_page
        );
        let response = self.send(&url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status, url });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch one repository's language breakdown from its `languages_url`.
    ///
    /// Only JSON responses are accepted.
    pub async fn languages(&self, url: &str) -> Result<LanguageBreakdown> {
        let response = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if !content_type.as_deref().is_some_and(is_json_content_type) {
            return Err(Error::UnexpectedContentType {
                content_type,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the weekly code-frequency series for `owner/name`.
    ///
    /// `202 Accepted` is retried according to `policy`; any other
    /// non-success status, an empty body, or an unparseable body is an error.
    pub async fn code_frequency<S: Sleeper>(
        &self,
        slug: &str,
        policy: &RetryPolicy,
        sleeper: &S,
    ) -> Result<Vec<CodeFrequencyPoint>> {
        let url = format!("{}/repos/{}/stats/code_frequency", self.api_url, slug);

        let target = url.as_str();
        let (status, body) = policy
            .run(sleeper, move |attempt| async move {
                debug!("code_frequency attempt {} for {}", attempt, target);
                let response = self.send(target).await?;
                let status = response.status();
                let body = response.text().await?;
                Ok::<_, Error>((status, body))
            })
            .await?;

        if !status.is_success() {
            return Err(Error::Status { status, url });
        }

        // 204 No Content is what GitHub sends for an empty repository.
        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Err(Error::EmptyPayload(url));
        }

        let points: Vec<CodeFrequencyPoint> = serde_json::from_str(&body)?;
        if points.is_empty() {
            return Err(Error::EmptyPayload(url));
        }

        Ok(points)
    }
}

/// `application/json` or any structured `+json` media type.
fn is_json_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media_type == "application/json" || media_type.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/vnd.github+json"));
        assert!(!is_json_content_type("text/html; charset=utf-8"));
        assert!(!is_json_content_type(""));
    }

    #[test]
    fn test_client_accepts_missing_token() {
        let github = GitHubConfig::default();
        assert!(GitHubClient::new(&github, &HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_client_rejects_unprintable_token() {
        let github = GitHubConfig {
            token: Some("bad\ntoken".to_string()),
            ..GitHubConfig::default()
        };
        assert!(matches!(
            GitHubClient::new(&github, &HttpConfig::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let github = GitHubConfig {
            api_url: "http://localhost:1234/".to_string(),
            ..GitHubConfig::default()
        };
        let client = GitHubClient::new(&github, &HttpConfig::default()).unwrap();
        assert_eq!(client.api_url, "http://localhost:1234");
    }
}
