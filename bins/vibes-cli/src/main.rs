//! vibes-cli — Offline trending tools for the ForTheVibes project feed.
//!
//! Scores single projects, ranks candidate batches, applies the thresholded
//! trending view, and cuts feed pages from JSON candidate files. Results go
//! to stdout as JSON; logs go to stderr.

mod config;
mod input;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use vibes_core::constants::{
    DEFAULT_MAX_AGE_HOURS, DEFAULT_MIN_POPULARITY, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, GRAVITY,
};
use vibes_core::traits::{Clock, FixedClock, SystemClock, TrendingScorer};
use vibes_core::types::{PageRequest, RankableItem, SortMode, TrendingThresholds};
use vibes_trending::feed::select_page_with;

use crate::config::{CliConfig, LogFormat};
use crate::input::load_candidates;

/// ForTheVibes trending tools.
#[derive(Parser)]
#[command(name = "vibes-cli")]
#[command(version, about = "Score and rank ForTheVibes projects by trending score.")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Decay exponent; higher values sink older projects faster.
    #[arg(long, global = true, env = "VIBES_GRAVITY", default_value_t = GRAVITY)]
    gravity: f64,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, env = "VIBES_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json").
    #[arg(long, global = true, env = "VIBES_LOG_FORMAT", default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single project.
    Score(ScoreArgs),
    /// Rank every candidate in a batch.
    Rank(RankArgs),
    /// Rank only candidates meeting popularity and age thresholds.
    Trending(TrendingArgs),
    /// Cut one feed page from a batch.
    Feed(FeedArgs),
}

#[derive(Args)]
struct NowArg {
    /// Instant to rank at (RFC 3339). Defaults to the current time.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

impl NowArg {
    fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(instant) => Box::new(FixedClock(instant)),
            None => Box::new(SystemClock),
        }
    }
}

#[derive(Args)]
struct ScoreArgs {
    /// Star count.
    #[arg(short, long)]
    popularity: u64,

    /// Creation time (RFC 3339).
    #[arg(short, long)]
    created_at: DateTime<Utc>,

    #[command(flatten)]
    now: NowArg,
}

#[derive(Args)]
struct RankArgs {
    /// JSON array of candidates, or "-" for stdin.
    #[arg(short, long)]
    input: PathBuf,

    #[command(flatten)]
    now: NowArg,
}

#[derive(Args)]
struct TrendingArgs {
    /// JSON array of candidates, or "-" for stdin.
    #[arg(short, long)]
    input: PathBuf,

    /// Minimum star count.
    #[arg(long, default_value_t = DEFAULT_MIN_POPULARITY)]
    min_popularity: u64,

    /// Maximum age in hours.
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_HOURS)]
    max_age_hours: f64,

    #[command(flatten)]
    now: NowArg,
}

#[derive(Args)]
struct FeedArgs {
    /// JSON array of candidates, or "-" for stdin.
    #[arg(short, long)]
    input: PathBuf,

    /// Feed ordering: recent, stars, or trending.
    #[arg(short, long, default_value = "recent")]
    sort: SortMode,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    page: u32,

    /// Items per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: u32,

    #[command(flatten)]
    now: NowArg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::resolve(
        cli.global.gravity,
        &cli.global.log_level,
        &cli.global.log_format,
    )?;

    init_logging(&config.log_level, config.log_format);
    if config.custom_gravity() {
        info!(gravity = config.params.gravity(), "using custom gravity");
    }

    match cli.command {
        Commands::Score(args) => cmd_score(&config, args),
        Commands::Rank(args) => cmd_rank(&config, args),
        Commands::Trending(args) => cmd_trending(&config, args),
        Commands::Feed(args) => cmd_feed(&config, args),
    }
}

fn cmd_score(config: &CliConfig, args: ScoreArgs) -> Result<()> {
    let engine = config.engine();
    let now = args.now.clock().now();
    let item = RankableItem::new("cli", args.created_at, args.popularity);

    let age_hours = engine.age_in_hours(item.created_at, now);
    let output = json!({
        "ageHours": age_hours,
        "decay": engine.params().decay(age_hours),
        "trendingScore": engine.score(&item, now),
    });
    print_json(&output)
}

fn cmd_rank(config: &CliConfig, args: RankArgs) -> Result<()> {
    let items = load_candidates(&args.input)?;
    let ranked = config.engine().rank(items, args.now.clock().now());
    print_json(&ranked)
}

fn cmd_trending(config: &CliConfig, args: TrendingArgs) -> Result<()> {
    let thresholds = TrendingThresholds::new(args.min_popularity, args.max_age_hours)
        .context("invalid trending thresholds")?;
    let items = load_candidates(&args.input)?;
    let ranked = config
        .engine()
        .filter_candidates(items, &thresholds, args.now.clock().now());
    info!(retained = ranked.len(), "applied trending thresholds");
    print_json(&ranked)
}

fn cmd_feed(config: &CliConfig, args: FeedArgs) -> Result<()> {
    let page = PageRequest::new(args.page, args.limit).context("invalid page request")?;
    let items = load_candidates(&args.input)?;
    let feed = select_page_with(
        &config.engine(),
        items,
        args.sort,
        &page,
        args.now.clock().now(),
    );
    print_json(&feed)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so stdout stays clean JSON.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}
