use mlb_playoff_calendar::config::Config;
use mlb_playoff_calendar::ical::{self, CalendarBuilder};
use mlb_playoff_calendar::normalize::Normalizer;
use mlb_playoff_calendar::scrape::SchedulePage;

use icalendar::Component;

fn config() -> Config {
    Config { season: 2025, ..Config::default() }
}

#[test]
fn empty_schedule_is_a_valid_calendar() {
    let doc = CalendarBuilder::new(&config()).build(Vec::new());
    let ics = doc.to_ics();

    assert!(ics.starts_with("BEGIN:VCALENDAR"), "ics was: {}", ics);
    assert!(ics.trim_end().ends_with("END:VCALENDAR"), "ics was: {}", ics);
    assert!(!ics.contains("BEGIN:VEVENT"), "ics was: {}", ics);

    let parsed = ical::parse_ics(&ics).expect("empty calendar parses");
    assert!(ical::events(&parsed).is_empty());
}

#[test]
fn serialized_calendar_parses_back_with_same_starts() {
    let config = config();
    let page = SchedulePage::parse(include_str!("sample_schedule.html"));
    let games = Normalizer::new(&config).normalize_all(page.records());
    let doc = CalendarBuilder::new(&config).build(games);
    assert_eq!(doc.len(), 3);

    let parsed = ical::parse_ics(&doc.to_ics()).expect("calendar parses");
    let events = ical::events(&parsed);
    assert_eq!(events.len(), doc.len());

    for (event, game) in events.iter().zip(&doc.events) {
        let expected = game.start.format("%Y%m%dT%H%M%S").to_string();
        assert_eq!(event.property_value("DTSTART"), Some(expected.as_str()));
        assert_eq!(event.property_value("UID"), Some(game.uid.as_str()));
    }
}

#[test]
fn writes_metadata_and_event_fields() {
    let config = config();
    let page = SchedulePage::parse(include_str!("sample_schedule.html"));
    let games = Normalizer::new(&config).normalize_all(page.records());
    let ics = CalendarBuilder::new(&config).build(games).to_ics();

    assert!(ics.contains("X-WR-CALNAME:MLB Playoffs 2025"), "ics was: {}", ics);
    assert!(ics.contains("X-WR-TIMEZONE:America/New_York"), "ics was: {}", ics);
    assert!(ics.contains("SUMMARY:AL Wild Card Game 1: Detroit Tigers @ Cleveland Guardians"), "ics was: {}", ics);
    assert!(ics.contains("LOCATION:Wrigley Field"), "ics was: {}", ics);
    assert!(ics.contains("UID:401809203-boston-red-sox-new-york-yankees@mlb-playoffs"), "ics was: {}", ics);
    assert!(ics.contains("DTSTART;TZID=America/New_York:20251001T180800"), "ics was: {}", ics);
    assert!(ics.contains("DTEND;TZID=America/New_York:20251001T213800"), "ics was: {}", ics);
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
}

#[test]
fn calendar_name_tracks_season_unless_given() {
    let by_season = CalendarBuilder::new(&Config { season: 2019, ..Config::default() }).build(Vec::new());
    assert_eq!(by_season.name, "MLB Playoffs 2019");
    assert!(by_season.to_ics().contains("X-WR-CALNAME:MLB Playoffs 2019"));

    let named = Config {
        season: 2019,
        calendar_name: Some("October Baseball".to_string()),
        ..Config::default()
    };
    let doc = CalendarBuilder::new(&named).build(Vec::new());
    assert!(doc.to_ics().contains("X-WR-CALNAME:October Baseball"));
}
