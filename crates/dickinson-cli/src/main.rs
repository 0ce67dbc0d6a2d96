use anyhow::{Context, Result};
use clap::Parser;
use dickinson_acquire::config::{DEFAULT_TIMEOUT, INDEX_URL, OUTPUT_FILE, USER_AGENT};
use dickinson_acquire::ScrapeConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "dickinson")]
#[command(about = "Scrape the list of Emily Dickinson poems and save their texts as JSON")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Page listing every poem with a link to its text
    #[arg(long, default_value = INDEX_URL)]
    index_url: String,

    /// Output file for the JSON catalog (overwritten if present)
    #[arg(short, long, default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// Maximum number of poem pages fetched at once
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            index_url: self.index_url.clone(),
            output_path: self.output.clone(),
            concurrency: usize::from(self.concurrency),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

fn init_tracing(level: &LogLevel, utc: bool) {
    // HTML parsing crates are chatty at debug/trace
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z".to_string();

    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.utc);

    let config = cli.scrape_config();
    tracing::info!(
        index = %config.index_url,
        output = %config.output_path.display(),
        concurrency = config.concurrency,
        "Building poem catalog"
    );

    let summary = match dickinson_acquire::acquire(&config).await {
        Ok(summary) => summary,
        Err(e) if e.is_fetch() => {
            tracing::error!(error = %e, "Fetch failed, no catalog written");
            return Err(e).context("Failed to fetch poem pages");
        }
        Err(e) => {
            tracing::error!(error = %e, path = %config.output_path.display(), "Could not write catalog");
            return Err(e).context("Failed to build poem catalog");
        }
    };

    tracing::info!(
        poems = summary.total,
        with_text = summary.with_content,
        without_text = summary.without_content,
        path = %config.output_path.display(),
        "Done"
    );

    Ok(())
}
