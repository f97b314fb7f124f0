use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{NaiveTime, TimeDelta};
use chrono_tz::Tz;
use clap::Parser;
use mlb_playoff_calendar::config::{self, Config, SourceKind};
use mlb_playoff_calendar::handler;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Scrape the MLB postseason schedule and write it as an ICS calendar.
#[derive(Parser, Debug)]
#[command(name = "mlb-playoff-calendar", version, about)]
struct Args {
    /// Which schedule source to read
    #[arg(long, value_enum, env = "MLB_ICS_SOURCE", default_value = "page")]
    source: SourceKind,

    /// Schedule URL; defaults to the page or stats API endpoint for the chosen source
    #[arg(long, env = "MLB_ICS_URL")]
    url: Option<String>,

    /// IANA timezone every game is normalized to
    #[arg(long, env = "MLB_ICS_TIMEZONE", default_value = "America/New_York", value_parser = config::parse_timezone)]
    timezone: Tz,

    /// Calendar file to overwrite
    #[arg(short, long, env = "MLB_ICS_OUTPUT", default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Assumed game length in minutes
    #[arg(
        long = "duration-minutes",
        env = "MLB_ICS_DURATION_MINUTES",
        default_value = "210",
        value_parser = config::parse_duration_minutes
    )]
    duration: TimeDelta,

    /// Start time (HH:MM) for games listed without one
    #[arg(long, env = "MLB_ICS_FALLBACK_TIME", default_value = "19:00", value_parser = config::parse_clock_time)]
    fallback_time: NaiveTime,

    /// Season year for date headings that omit it; defaults to the current year
    #[arg(long, env = "MLB_ICS_SEASON")]
    season: Option<i32>,

    /// Request timeout in seconds
    #[arg(long, env = "MLB_ICS_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        let source_url = self.url.unwrap_or_else(|| match self.source {
            SourceKind::Page => config::DEFAULT_SOURCE_URL.to_string(),
            SourceKind::StatsApi => config::DEFAULT_STATS_API_URL.to_string(),
        });
        Config {
            source: self.source,
            source_url,
            timezone: self.timezone,
            output_path: self.output,
            game_duration: self.duration,
            fallback_time: self.fallback_time,
            season: self.season.unwrap_or(defaults.season),
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            ..defaults
        }
    }
}

fn main() -> ExitCode {
    // Initialize structured logging with tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    let config = Args::parse().into_config();

    match handler::run(&config) {
        Ok(summary) => {
            info!(
                records = summary.records,
                events = summary.events,
                output = %summary.output_path.display(),
                "Calendar file created"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_option_values() {
        let args = Args::try_parse_from([
            "mlb-playoff-calendar",
            "--source",
            "stats-api",
            "--timezone",
            "America/Chicago",
            "--duration-minutes",
            "180",
            "--fallback-time",
            "20:05",
            "--season",
            "2025",
        ])
        .unwrap();
        let config = args.into_config();

        assert_eq!(config.source, SourceKind::StatsApi);
        assert_eq!(config.source_url, config::DEFAULT_STATS_API_URL);
        assert_eq!(config.timezone, chrono_tz::America::Chicago);
        assert_eq!(config.game_duration, TimeDelta::hours(3));
        assert_eq!(config.fallback_time, NaiveTime::from_hms_opt(20, 5, 0).unwrap());
        assert_eq!(config.calendar_name(), "MLB Playoffs 2025");
    }

    #[test]
    fn rejects_bad_option_values() {
        for (flag, value) in [
            ("--duration-minutes", "999999999999999999"),
            ("--duration-minutes", "0"),
            ("--fallback-time", "8pm"),
            ("--timezone", "Mars/Olympus"),
        ] {
            let err = Args::try_parse_from(["mlb-playoff-calendar", flag, value]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{} {}", flag, value);
        }
    }
}
