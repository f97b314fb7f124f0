use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;

/// A normalized game, ready to become a VEVENT.
#[derive(Clone, Debug, PartialEq)]
pub struct GameEvent {
    pub uid: String,
    pub start: DateTime<Tz>,
    pub duration: TimeDelta,
    pub title: String,
    pub location: String,
    pub description: String,
}

impl GameEvent {
    pub fn end(&self) -> DateTime<Tz> {
        self.start + self.duration
    }
}
