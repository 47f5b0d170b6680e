//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// readme-stats - regenerate a GitHub profile README
///
/// Collects per-language byte counts and recent code-frequency activity
/// for a GitHub account and writes them into a README as a fixed-width
/// text block.
///
/// Examples:
///   readme-stats stats --user octocat
///   readme-stats stats --exclude octocat,dotfiles --dry-run
///   readme-stats stamp --output README.md
///   readme-stats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// README file to write
    ///
    /// Defaults to README.md or the [output] path from the config file.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .readme-stats.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .readme-stats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch language and activity stats and overwrite the README
    Stats(StatsArgs),
    /// Prepend an "Updated" timestamp to the README
    Stamp,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// GitHub account whose repositories are listed
    #[arg(short, long, env = "GITHUB_USERNAME")]
    pub user: Option<String>,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Repository names to skip (comma-separated)
    ///
    /// Added to the [github] exclude list from the config file.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Number of repositories fetched concurrently
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Print the rendered block instead of writing the README
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let Some(ref command) = self.command else {
            return Err("A subcommand is required: stats or stamp".to_string());
        };

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::Stats(stats) = command {
            if let Some(ref api_url) = stats.api_url {
                if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                    return Err("API URL must start with 'http://' or 'https://'".to_string());
                }
            }

            if stats.concurrency == Some(0) {
                return Err("Concurrency must be at least 1".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether the stats run only prints its output.
    pub fn dry_run(&self) -> bool {
        matches!(self.command, Some(Command::Stats(ref s)) if s.dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            command: Some(Command::Stats(StatsArgs {
                user: Some("octocat".to_string()),
                ..StatsArgs::default()
            })),
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_stats_subcommand() {
        let args = Args::try_parse_from([
            "readme-stats",
            "stats",
            "--user",
            "octocat",
            "--exclude",
            "octocat,dotfiles",
            "--output",
            "profile.md",
        ])
        .unwrap();

        match args.command {
            Some(Command::Stats(ref stats)) => {
                assert_eq!(stats.user.as_deref(), Some("octocat"));
                assert_eq!(
                    stats.exclude.as_deref(),
                    Some(&["octocat".to_string(), "dotfiles".to_string()][..])
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.output, Some(PathBuf::from("profile.md")));
    }

    #[test]
    fn test_parse_stamp_subcommand() {
        let args = Args::try_parse_from(["readme-stats", "stamp"]).unwrap();
        assert!(matches!(args.command, Some(Command::Stamp)));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_requires_command() {
        let mut args = make_args();
        args.command = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_api_url() {
        let mut args = make_args();
        args.command = Some(Command::Stats(StatsArgs {
            api_url: Some("api.github.com".to_string()),
            ..StatsArgs::default()
        }));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_concurrency() {
        let mut args = make_args();
        args.command = Some(Command::Stats(StatsArgs {
            concurrency: Some(0),
            ..StatsArgs::default()
        }));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
