use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use covid_collector::dates::DateRange;
use covid_collector::fetch::Covid19Api;
use covid_collector::pipeline;
use covid_collector::store::{self, CsvStore};
use tracing::{error, info};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Collection window as two dates, yyyy-MM-ddTHH:mm:ssZ each, or
    /// nothing for the 7 days ending now
    #[clap(value_name = "DATE", num_args = 0..)]
    dates: Vec<String>,
    #[clap(short, long, global = true)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    // Captured once; every date decision below uses this value.
    let now = Utc::now();

    let range = match resolve_range(&args.dates, now) {
        Some(range) => range,
        None => return Ok(()),
    };

    let source = Covid19Api::new();
    let store = CsvStore::new(store::DEFAULT_FILENAME);
    pipeline::run(&range, &source, &store).await
}

/// Turns the positional date arguments into a collection window: none
/// means the default last-week window, exactly two are validated, and any
/// other count gets a usage message. `None` means the run should stop
/// without doing work.
fn resolve_range(dates: &[String], now: DateTime<Utc>) -> Option<DateRange> {
    match dates {
        [] => Some(DateRange::last_week(now)),
        [start, end] => {
            info!("Inputs provided: {} {}", start, end);
            match DateRange::validate(start, end, now) {
                Ok(range) => Some(range),
                Err(err) => {
                    error!("Invalid arguments: {}", err);
                    None
                }
            }
        }
        other => {
            error!("Provide either two valid dates or zero");
            error!("Inputs provided: {}", other.join(" "));
            None
        }
    }
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
