use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, NaiveTime, TimeDelta};
use chrono_tz::Tz;

use crate::error::ConfigError;

pub const DEFAULT_SOURCE_URL: &str = "https://www.espn.com/mlb/schedule/_/seasontype/3";
pub const DEFAULT_STATS_API_URL: &str = "https://statsapi.mlb.com/api/v1/schedule";
pub const DEFAULT_OUTPUT_PATH: &str = "mlb_playoffs.ics";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Where the schedule comes from. Only one source is read per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// Scrape the HTML schedule page.
    Page,
    /// Read the league's JSON schedule endpoint.
    StatsApi,
}

/// Run configuration handed to every pipeline component.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceKind,
    pub source_url: String,
    pub timezone: Tz,
    pub output_path: PathBuf,
    /// Length given to every event, since real end times are unknown.
    pub game_duration: TimeDelta,
    /// Start time used when a row carries a date but no usable clock time.
    pub fallback_time: NaiveTime,
    /// Year used to complete date headings that omit it.
    pub season: i32,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    /// Calendar title; `MLB Playoffs {season}` when unset.
    pub calendar_name: Option<String>,
    pub calendar_description: String,
}

impl Config {
    pub fn calendar_name(&self) -> String {
        self.calendar_name
            .clone()
            .unwrap_or_else(|| format!("MLB Playoffs {}", self.season))
    }
}

impl Default for Config {
    fn default() -> Self {
        let season = chrono::Utc::now().year();
        Self {
            source: SourceKind::Page,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            timezone: chrono_tz::America::New_York,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            game_duration: TimeDelta::minutes(210),
            fallback_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
            season,
            fetch_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            calendar_name: None,
            calendar_description: "MLB Playoff Schedule - Auto-updated daily from MLB.com".to_string(),
        }
    }
}

/// Parse an IANA zone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::Timezone(name.to_string()))
}

/// Parse a 24h clock time, `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(text: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| ConfigError::ClockTime(text.to_string()))
}

/// Parse a positive duration given in whole minutes.
pub fn parse_duration_minutes(text: &str) -> Result<TimeDelta, ConfigError> {
    match text.trim().parse::<i64>() {
        Ok(mins) if mins > 0 => TimeDelta::try_minutes(mins).ok_or_else(|| ConfigError::Duration(text.to_string())),
        _ => Err(ConfigError::Duration(text.to_string())),
    }
}
