use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::{Config, SourceKind};
use crate::error::RunError;
use crate::fetch::Fetcher;
use crate::ical::CalendarBuilder;
use crate::model::game::GameEvent;
use crate::normalize::Normalizer;
use crate::scrape::SchedulePage;
use crate::statsapi::StatsApi;
use crate::writer::write_calendar;

// How many games are echoed to the log after a run
const LOGGED_GAMES: usize = 15;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub events: usize,
    pub output_path: PathBuf,
}

/// Fetch, parse, normalize, build and write the calendar once.
///
/// Fetch and write failures are returned; everything per-record is logged and skipped.
/// Nothing is written when the fetch fails.
#[instrument(skip(config), fields(source = ?config.source, url = %config.source_url))]
pub fn run(config: &Config) -> Result<Summary, RunError> {
    let fetcher = Fetcher::new(config.fetch_timeout, &config.user_agent);
    let normalizer = Normalizer::new(config);

    let mut records = 0usize;
    let games: Vec<GameEvent> = match config.source {
        SourceKind::Page => {
            let body = fetcher.fetch(&config.source_url)?;
            let page = SchedulePage::parse(&body);
            normalizer.normalize_all(page.records().inspect(|_| records += 1))
        }
        SourceKind::StatsApi => {
            let api = StatsApi::new(&config.source_url, config.season);
            let raw = api.fetch_records(&fetcher)?;
            records = raw.len();
            normalizer.normalize_all(raw)
        }
    };
    info!(records, games = games.len(), "Normalized schedule");

    let document = CalendarBuilder::new(config).build(games);
    if document.is_empty() {
        info!("No games found. The playoffs may not have started yet or may be over.");
    }
    for game in document.events.iter().take(LOGGED_GAMES) {
        info!(start = %game.start.format("%Y-%m-%d %I:%M %p %Z"), title = %game.title, "Scheduled game");
    }

    write_calendar(&config.output_path, &document.to_ics())?;

    Ok(Summary {
        records,
        events: document.len(),
        output_path: config.output_path.clone(),
    })
}
