//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.readme-stats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".readme-stats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub account and API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Code-frequency window and retry settings.
    #[serde(default)]
    pub activity: ActivityConfig,

    /// Report layout settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// GitHub account and API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Account whose repositories are listed.
    #[serde(default)]
    pub username: String,

    /// Access token. Normally supplied through `GITHUB_TOKEN` instead.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Repository names to leave out of the report.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Page size for the repository listing. Only the first page is read.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            username: String::new(),
            token: None,
            exclude: Vec::new(),
            per_page: default_per_page(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    100
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Number of repositories fetched concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_concurrency() -> usize {
    1
}

/// Code-frequency window and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Length of the trailing window in weeks.
    #[serde(default = "default_window_weeks")]
    pub window_weeks: i64,

    /// Total attempts while GitHub is still computing statistics.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts, in seconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: u64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            window_weeks: default_window_weeks(),
            max_attempts: default_max_attempts(),
            retry_delay_seconds: default_retry_delay(),
        }
    }
}

impl ActivityConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

fn default_window_weeks() -> i64 {
    6
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    5
}

/// Report layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Header line inside the fenced block.
    #[serde(default = "default_header")]
    pub header: String,

    /// Number of segments in each language bar.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Width of the language name column.
    #[serde(default = "default_name_width")]
    pub name_width: usize,

    /// Width of the repository name column.
    #[serde(default = "default_repo_width")]
    pub repo_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            bar_width: default_bar_width(),
            name_width: default_name_width(),
            repo_width: default_repo_width(),
        }
    }
}

fn default_header() -> String {
    "📊 Language Stats & Recent Activity".to_string()
}

fn default_bar_width() -> usize {
    20
}

fn default_name_width() -> usize {
    12
}

fn default_repo_width() -> usize {
    20
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// README file to rewrite.
    #[serde(default = "default_output")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output(),
        }
    }
}

fn default_output() -> String {
    "README.md".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the user actually supplied (flag or environment) override
    /// the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.output.path = output.display().to_string();
        }

        if let Some(crate::cli::Command::Stats(ref stats)) = args.command {
            if let Some(ref user) = stats.user {
                self.github.username = user.clone();
            }
            if let Some(ref token) = stats.token {
                self.github.token = Some(token.clone());
            }
            if let Some(ref api_url) = stats.api_url {
                self.github.api_url = api_url.clone();
            }
            if let Some(ref exclude) = stats.exclude {
                self.github.exclude.extend(exclude.iter().cloned());
            }
            if let Some(concurrency) = stats.concurrency {
                self.http.concurrency = concurrency;
            }
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.per_page, 100);
        assert_eq!(config.activity.window_weeks, 6);
        assert_eq!(config.activity.max_attempts, 2);
        assert_eq!(config.activity.retry_delay(), Duration::from_secs(5));
        assert_eq!(config.render.bar_width, 20);
        assert_eq!(config.output.path, "README.md");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[github]
username = "octocat"
exclude = ["octocat", "dotfiles"]

[activity]
retry_delay_seconds = 1

[output]
path = "profile/README.md"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.exclude, vec!["octocat", "dotfiles"]);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.activity.retry_delay_seconds, 1);
        assert_eq!(config.activity.max_attempts, 2);
        assert_eq!(config.output.path, "profile/README.md");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[github\nusername = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[github]"));
        assert!(toml_str.contains("[activity]"));
        assert!(toml_str.contains("[render]"));
        assert!(!toml_str.contains("token"));
    }
}
