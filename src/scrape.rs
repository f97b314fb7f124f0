use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{instrument, warn};

use crate::model::record::RawGameRecord;

// Layout of the schedule page: one block per day, a heading with the date,
// one table row per game.
const DAY_BLOCK: &str = "div.ScheduleTables";
const DAY_TITLE: &str = ".Table__Title";
const GAME_ROW: &str = "tbody tr";
const AWAY_CELL: &str = "td.events__col";
const HOME_CELL: &str = "td.colspan__col";
const TIME_CELL: &str = "td.date__col";
const VENUE_CELL: &str = "td.venue__col";
const SERIES_CELL: &str = "td.series__col";
const GAME_LINK: &str = "a[href*=\"gameId\"]";

struct Selectors {
    day: Selector,
    title: Selector,
    row: Selector,
    away: Selector,
    home: Selector,
    time: Selector,
    venue: Selector,
    series: Selector,
    game_link: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    let parse = |s: &str| Selector::parse(s).expect("static selector is valid CSS");
    Selectors {
        day: parse(DAY_BLOCK),
        title: parse(DAY_TITLE),
        row: parse(GAME_ROW),
        away: parse(AWAY_CELL),
        home: parse(HOME_CELL),
        time: parse(TIME_CELL),
        venue: parse(VENUE_CELL),
        series: parse(SERIES_CELL),
        game_link: parse(GAME_LINK),
    }
});

/// A parsed schedule page.
pub struct SchedulePage {
    html: Html,
    selectors: &'static Selectors,
}

impl SchedulePage {
    /// Parse raw markup. Any input is accepted; broken HTML is repaired by the parser.
    #[instrument(level = "info", skip(markup), fields(bytes = markup.len()))]
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            selectors: &SELECTORS,
        }
    }

    /// Lazily walk the page and yield one record per usable game row.
    ///
    /// A page without any day block yields nothing and logs a warning. Rows missing
    /// a date or a team are skipped one by one.
    pub fn records(&self) -> impl Iterator<Item = RawGameRecord> + '_ {
        if self.html.select(&self.selectors.day).next().is_none() {
            warn!(selector = DAY_BLOCK, "No schedule blocks found; page layout may have changed");
        }

        self.html.select(&self.selectors.day).flat_map(move |day| {
            let heading = first_text(day, &self.selectors.title);
            day.select(&self.selectors.row)
                .filter_map(move |row| self.row_record(row, heading.as_deref()))
        })
    }

    fn row_record(&self, row: ElementRef<'_>, heading: Option<&str>) -> Option<RawGameRecord> {
        let sel = self.selectors;

        // A row-level date wins over the block heading
        let date_text = row
            .value()
            .attr("data-date")
            .map(normalize_ws)
            .filter(|s| !s.is_empty())
            .or_else(|| heading.map(str::to_string));
        let Some(date_text) = date_text else {
            warn!(row = %normalize_ws(&row.text().collect::<String>()), "Skipping game row without a date");
            return None;
        };

        let away_team = first_text(row, &sel.away).map(|s| strip_matchup_marker(&s)).unwrap_or_default();
        let home_team = first_text(row, &sel.home).map(|s| strip_matchup_marker(&s)).unwrap_or_default();
        if away_team.is_empty() || home_team.is_empty() {
            warn!(date = %date_text, away = %away_team, home = %home_team, "Skipping game row without both teams");
            return None;
        }

        let game_id = row
            .select(&sel.game_link)
            .filter_map(|a| a.value().attr("href"))
            .find_map(game_id_from_href);

        Some(RawGameRecord {
            date_text,
            time_text: first_text(row, &sel.time),
            away_team,
            home_team,
            venue: first_text(row, &sel.venue),
            game_id,
            series: first_text(row, &sel.series),
            game_number: None,
            status: None,
        })
    }
}

/// Whitespace-normalized text of the first match, or None when absent or blank.
fn first_text(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    el.select(selector)
        .next()
        .map(|e| normalize_ws(&e.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Home cells read "@ Seattle Mariners" or "vs Seattle Mariners"
fn strip_matchup_marker(s: &str) -> String {
    let t = s.trim();
    let t = t
        .strip_prefix('@')
        .or_else(|| t.strip_prefix("vs."))
        .or_else(|| t.strip_prefix("vs "))
        .unwrap_or(t);
    t.trim().to_string()
}

fn game_id_from_href(href: &str) -> Option<String> {
    let idx = href.find("gameId")?;
    let rest = &href[idx + "gameId".len()..];
    let rest = rest.trim_start_matches(['/', '=']);
    let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_home_marker() {
        assert_eq!(strip_matchup_marker("@ Seattle Mariners"), "Seattle Mariners");
        assert_eq!(strip_matchup_marker("vs Toronto Blue Jays"), "Toronto Blue Jays");
        assert_eq!(strip_matchup_marker("Detroit Tigers"), "Detroit Tigers");
    }

    #[test]
    fn extracts_game_id_from_links() {
        assert_eq!(game_id_from_href("/mlb/game/_/gameId/401809270/tigers-mariners").as_deref(), Some("401809270"));
        assert_eq!(game_id_from_href("/mlb/game?gameId=401809271").as_deref(), Some("401809271"));
        assert_eq!(game_id_from_href("/mlb/team/_/name/sea"), None);
    }

    #[test]
    fn row_date_attribute_overrides_heading() {
        let html = r#"<div class="ScheduleTables"><div class="Table__Title">Saturday, October 4, 2025</div>
            <table><tbody><tr data-date="2025-10-05">
              <td class="events__col">Detroit Tigers</td><td class="colspan__col">@ Seattle Mariners</td>
              <td class="date__col">4:38 PM</td></tr></tbody></table></div>"#;
        let page = SchedulePage::parse(html);
        let records: Vec<_> = page.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_text, "2025-10-05");
        assert_eq!(records[0].venue, None);
    }
}
