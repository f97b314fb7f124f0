use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::RecordError;
use crate::model::game::GameEvent;
use crate::model::record::RawGameRecord;

const UID_DOMAIN: &str = "mlb-playoffs";

// Tried in order against the full date text.
const DATE_FORMATS: [&str; 6] = [
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

// Headings such as "Sat, Oct 4" carry no year; the season is appended.
const YEARLESS_DATE_FORMATS: [&str; 4] = ["%A, %B %d %Y", "%a, %b %d %Y", "%B %d %Y", "%b %d %Y"];

const TIME_FORMATS: [&str; 3] = ["%I:%M %p", "%I:%M%p", "%H:%M"];

/// Turns scraped text into events pinned to one timezone.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tz: Tz,
    fallback_time: NaiveTime,
    season: i32,
    duration: TimeDelta,
}

impl Normalizer {
    pub fn new(config: &Config) -> Self {
        Self {
            tz: config.timezone,
            fallback_time: config.fallback_time,
            season: config.season,
            duration: config.game_duration,
        }
    }

    /// Normalize every record, dropping (and logging) the ones that fail.
    pub fn normalize_all<I>(&self, records: I) -> Vec<GameEvent>
    where
        I: IntoIterator<Item = RawGameRecord>,
    {
        records.into_iter().filter_map(|r| self.normalize(&r)).collect()
    }

    /// Returns None and logs a warning when the record cannot become an event.
    pub fn normalize(&self, raw: &RawGameRecord) -> Option<GameEvent> {
        match self.try_normalize(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(
                    reason = %e,
                    date = %raw.date_text,
                    away = %raw.away_team,
                    home = %raw.home_team,
                    "Skipping game record"
                );
                None
            }
        }
    }

    pub fn try_normalize(&self, raw: &RawGameRecord) -> Result<GameEvent, RecordError> {
        let away = raw.away_team.trim();
        let home = raw.home_team.trim();
        if away.is_empty() || home.is_empty() {
            return Err(RecordError::MissingTeams);
        }

        let date_text = raw.date_text.trim();
        if date_text.is_empty() {
            return Err(RecordError::MissingDate);
        }

        let start = self.start_time(date_text, raw.time_text.as_deref())?;

        let uid_key = raw
            .game_id
            .clone()
            .unwrap_or_else(|| start.format("%Y%m%d%H%M").to_string());
        let uid = format!("{}-{}-{}@{}", uid_key, slug(away), slug(home), UID_DOMAIN);

        let series = raw.series.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let title = match (series, raw.game_number) {
            (Some(series), Some(n)) => format!("{} Game {}: {} @ {}", series, n, away, home),
            (Some(series), None) => format!("{}: {} @ {}", series, away, home),
            _ => format!("{} @ {}", away, home),
        };

        let mut description = String::new();
        if let Some(series) = series {
            description.push_str(series);
            description.push('\n');
        }
        description.push_str(&format!("{} at {}", away, home));
        if let Some(status) = raw.status.as_deref().filter(|s| !s.trim().is_empty()) {
            description.push_str("\nStatus: ");
            description.push_str(status.trim());
        }

        Ok(GameEvent {
            uid,
            start,
            duration: self.duration,
            title,
            location: raw.venue.as_deref().map(str::trim).unwrap_or_default().to_string(),
            description,
        })
    }

    fn start_time(&self, date_text: &str, time_text: Option<&str>) -> Result<DateTime<Tz>, RecordError> {
        // Full instants carry their own time; only the zone is changed
        if let Ok(instant) = DateTime::parse_from_rfc3339(date_text) {
            return Ok(instant.with_timezone(&self.tz));
        }

        let date = self
            .parse_date(date_text)
            .ok_or_else(|| RecordError::UnparseableDate(date_text.to_string()))?;

        let time = match time_text.and_then(parse_time) {
            Some(t) => t,
            None => {
                warn!(
                    date = %date_text,
                    time = time_text.unwrap_or(""),
                    fallback = %self.fallback_time,
                    "No usable start time; using fallback"
                );
                self.fallback_time
            }
        };

        let naive = date.and_time(time);
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| RecordError::NonexistentLocalTime(naive.to_string()))
    }

    fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim().trim_end_matches('.');
        if let Some(d) = DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(text, f).ok()) {
            return Some(d);
        }
        let with_season = format!("{} {}", text, self.season);
        let parsed = YEARLESS_DATE_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(&with_season, f).ok());
        if parsed.is_some() {
            debug!(date = %text, season = self.season, "Completed date heading with season year");
        }
        parsed
    }
}

/// Parse a clock time such as "8:08 PM ET"; any zone hint after it is ignored.
fn parse_time(text: &str) -> Option<NaiveTime> {
    let cleaned = text.replace('.', "").to_ascii_uppercase();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let candidates = [tokens.iter().take(2).copied().collect::<Vec<_>>().join(" "), tokens.first()?.to_string()];
    candidates
        .iter()
        .find_map(|c| TIME_FORMATS.iter().find_map(|f| NaiveTime::parse_from_str(c, f).ok()))
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}
