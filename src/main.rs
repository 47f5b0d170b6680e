//! readme-stats - regenerate a GitHub profile README
//!
//! `stats` rewrites the README with language and activity statistics;
//! `stamp` prepends an "Updated" timestamp to it.
//!
//! Exit codes:
//!   0 - Success (including runs where GitHub data was unavailable)
//!   1 - Configuration error or the README could not be read/written

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use readme_stats::analysis::{ActivityWindow, StatsCollector};
use readme_stats::cli::{Args, Command};
use readme_stats::config::{Config, CONFIG_FILE};
use readme_stats::github::{GitHubClient, RetryPolicy, TokioSleeper};
use readme_stats::report;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials usually come from a .env file when run locally
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("readme-stats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let result = match args.command {
        Some(Command::Stats(_)) => run_stats(&args).await,
        Some(Command::Stamp) => run_stamp(&args),
        None => Ok(()),
    };

    if let Err(e) = result {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .readme-stats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to set your username, excluded repositories, and layout.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        Config::load(config_path)?
    } else {
        match Config::load_default() {
            Ok(Some(config)) => {
                info!("Loaded default config from {}", CONFIG_FILE);
                config
            }
            Ok(None) => {
                debug!("No config file found, using defaults");
                Config::default()
            }
            Err(e) => {
                warn!("Failed to load config: {:#}", e);
                Config::default()
            }
        }
    };

    config.merge_with_args(args);
    Ok(config)
}

/// Collect statistics and overwrite the README with the rendered block.
async fn run_stats(args: &Args) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(args)?;

    if config.github.username.is_empty() {
        warn!("No GitHub username configured (set GITHUB_USERNAME or --user)");
    }

    let client = GitHubClient::new(&config.github, &config.http)
        .context("Failed to create GitHub client")?;

    let collector = StatsCollector {
        client: &client,
        account: config.github.username.clone(),
        excluded: config.github.exclude.iter().cloned().collect::<HashSet<_>>(),
        policy: RetryPolicy::new(config.activity.max_attempts, config.activity.retry_delay()),
        sleeper: TokioSleeper,
        window: ActivityWindow::trailing(Utc::now(), config.activity.window_weeks),
        concurrency: config.http.concurrency,
        show_progress: !args.quiet,
    };

    let stats = collector.collect().await;
    let block = report::generate_readme_block(&stats, &config.render);

    if args.dry_run() {
        print!("{}", block);
        return Ok(());
    }

    let output = Path::new(&config.output.path);
    report::write_readme(output, &block)
        .with_context(|| format!("Failed to write README to {}", output.display()))?;

    println!(
        "✅ {} updated: {} languages, {} recent updates ({:.1}s)",
        output.display(),
        stats.languages.len(),
        stats.updates.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Prepend the current local time to the README.
fn run_stamp(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let output = Path::new(&config.output.path);

    report::prepend_timestamp(output, &Local::now())
        .with_context(|| format!("Failed to update {}", output.display()))?;

    println!("✅ {} was updated!", output.display());
    Ok(())
}
