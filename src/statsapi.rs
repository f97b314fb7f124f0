use std::collections::HashSet;

use tracing::{info, instrument, warn};

use crate::error::FetchError;
use crate::fetch::Fetcher;
use crate::model::record::RawGameRecord;
use crate::model::schedule::{ScheduleDocument, ScheduleGame};

/// Postseason game types: all rounds, division series, league championship, world series.
pub const POSTSEASON_GAME_TYPES: [&str; 4] = ["F", "D", "L", "W"];

/// The league's JSON schedule endpoint, queried once per postseason game type.
#[derive(Debug, Clone)]
pub struct StatsApi {
    base_url: String,
    season: i32,
}

impl StatsApi {
    pub fn new(base_url: &str, season: i32) -> Self {
        Self { base_url: base_url.trim_end_matches('?').to_string(), season }
    }

    pub fn schedule_url(&self, game_type: &str) -> String {
        format!(
            "{}?sportId=1&season={}&gameType={}&hydrate=team,venue",
            self.base_url, self.season, game_type
        )
    }

    /// Fetch every postseason game type and merge them, keeping the first copy of each game id.
    /// Any failed request aborts the whole fetch.
    #[instrument(level = "info", skip(self, fetcher), fields(season = self.season))]
    pub fn fetch_records(&self, fetcher: &Fetcher) -> Result<Vec<RawGameRecord>, FetchError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records: Vec<RawGameRecord> = Vec::new();
        for game_type in POSTSEASON_GAME_TYPES {
            let url = self.schedule_url(game_type);
            let body = fetcher.fetch(&url)?;
            let batch = Self::records_from_json(&body)?;
            info!(game_type, games = batch.len(), "Read stats API schedule");
            for record in batch {
                let duplicate = record.game_id.as_ref().is_some_and(|id| !seen.insert(id.clone()));
                if !duplicate {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    /// Decode one schedule response (no network).
    pub fn records_from_json(body: &str) -> Result<Vec<RawGameRecord>, FetchError> {
        let doc: ScheduleDocument = serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(doc
            .dates
            .into_iter()
            .flat_map(|d| d.games)
            .filter_map(game_record)
            .collect())
    }
}

fn game_record(game: ScheduleGame) -> Option<RawGameRecord> {
    let Some(date_text) = game.game_date.or(game.official_date) else {
        warn!(game_pk = ?game.game_pk, "Skipping stats API game without a date");
        return None;
    };
    let (away_team, home_team) = match game.teams {
        Some(teams) => (
            teams.away.and_then(|s| s.team).and_then(|t| t.name).unwrap_or_default(),
            teams.home.and_then(|s| s.team).and_then(|t| t.name).unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    Some(RawGameRecord {
        date_text,
        time_text: None,
        away_team,
        home_team,
        venue: game.venue.and_then(|v| v.name),
        game_id: game.game_pk.map(|pk| pk.to_string()),
        series: game.series_description,
        game_number: game.series_game_number,
        status: game.status.and_then(|s| s.detailed_state),
    })
}
