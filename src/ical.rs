use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};
use tracing::{info, warn};

use crate::config::Config;
use crate::model::game::GameEvent;

/// Events in start order plus the metadata written into the VCALENDAR header.
#[derive(Debug, Clone)]
pub struct CalendarDocument {
    pub name: String,
    pub description: String,
    pub timezone: Tz,
    pub events: Vec<GameEvent>,
}

impl CalendarDocument {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Build the icalendar tree: one VEVENT per game.
    pub fn to_calendar(&self) -> Calendar {
        let stamp = Utc::now();
        let mut calendar = Calendar::new();
        calendar
            .name(&self.name)
            .description(&self.description)
            .timezone(self.timezone.name());

        for game in &self.events {
            let event = Event::new()
                .uid(&game.uid)
                .timestamp(stamp)
                .summary(&game.title)
                .description(&game.description)
                .location(&game.location)
                .starts(zoned(game.start))
                .ends(zoned(game.end()))
                .done();
            calendar.push(event);
        }
        calendar
    }

    /// Serialize to ICS text.
    pub fn to_ics(&self) -> String {
        self.to_calendar().to_string()
    }
}

// DTSTART;TZID=America/New_York:20251004T160800
fn zoned(dt: DateTime<Tz>) -> CalendarDateTime {
    CalendarDateTime::WithTimezone {
        date_time: dt.naive_local(),
        tzid: dt.timezone().name().to_string(),
    }
}

/// Collects normalized games into a calendar with fixed metadata.
#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    name: String,
    description: String,
    timezone: Tz,
}

impl CalendarBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            name: config.calendar_name(),
            description: config.calendar_description.clone(),
            timezone: config.timezone,
        }
    }

    /// Sort games by start time and keep the first game seen for each UID.
    /// An empty input gives an empty but valid calendar.
    pub fn build<I>(&self, games: I) -> CalendarDocument
    where
        I: IntoIterator<Item = GameEvent>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut events: Vec<GameEvent> = Vec::new();
        for game in games {
            if seen.insert(game.uid.clone()) {
                events.push(game);
            } else {
                warn!(uid = %game.uid, title = %game.title, "Dropping game with duplicate UID");
            }
        }
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.uid.cmp(&b.uid)));
        info!(event_count = events.len(), "Built calendar");

        CalendarDocument {
            name: self.name.clone(),
            description: self.description.clone(),
            timezone: self.timezone,
            events,
        }
    }
}

/// Parse ICS text back into a calendar (used to check generated output).
pub fn parse_ics(ics: &str) -> Result<Calendar, String> {
    let unfolded = icalendar::parser::unfold(ics);
    let parsed = icalendar::parser::read_calendar(&unfolded)?;
    Ok(parsed.into())
}

/// The VEVENTs of a parsed calendar.
pub fn events(calendar: &Calendar) -> Vec<&Event> {
    calendar
        .components
        .iter()
        .filter_map(|c| match c {
            icalendar::CalendarComponent::Event(e) => Some(e),
            _ => None,
        })
        .collect()
}
