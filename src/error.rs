use std::fmt;
use std::path::PathBuf;

/// The schedule could not be retrieved. Aborts the run.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// The server answered with a non-2xx status.
    Status { code: u16, url: String },
    /// The body could not be read as text.
    Body(String),
    /// The body was not the JSON document we expected.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "Request failed: {}", msg),
            FetchError::Status { code, url } => write!(f, "GET {} returned status {}", url, code),
            FetchError::Body(msg) => write!(f, "Failed to read response body: {}", msg),
            FetchError::Decode(msg) => write!(f, "Failed to decode response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// The calendar could not be written. Aborts the run.
#[derive(Debug)]
pub struct WriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Failed to write {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// An option value given on the command line or environment is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Timezone(String),
    ClockTime(String),
    Duration(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Timezone(v) => write!(f, "Unknown timezone: {}", v),
            ConfigError::ClockTime(v) => write!(f, "Invalid clock time (expected HH:MM): {}", v),
            ConfigError::Duration(v) => write!(f, "Invalid duration in minutes: {}", v),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Why a single scraped record was dropped. Logged and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    MissingDate,
    MissingTeams,
    UnparseableDate(String),
    NonexistentLocalTime(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::MissingDate => write!(f, "Record has no date"),
            RecordError::MissingTeams => write!(f, "Record is missing a team name"),
            RecordError::UnparseableDate(v) => write!(f, "Unrecognized date: {}", v),
            RecordError::NonexistentLocalTime(v) => write!(f, "Local time does not exist in zone: {}", v),
        }
    }
}

impl std::error::Error for RecordError {}

/// Failure of a whole run, surfaced as a non-zero exit.
#[derive(Debug)]
pub enum RunError {
    Fetch(FetchError),
    Write(WriteError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::Fetch(e) => write!(f, "Fetch error: {}", e),
            RunError::Write(e) => write!(f, "Write error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Fetch(e) => Some(e),
            RunError::Write(e) => Some(e),
        }
    }
}

impl From<FetchError> for RunError {
    fn from(e: FetchError) -> Self {
        RunError::Fetch(e)
    }
}

impl From<WriteError> for RunError {
    fn from(e: WriteError) -> Self {
        RunError::Write(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_start_capitalized() {
        let messages = [
            RecordError::MissingDate.to_string(),
            RecordError::MissingTeams.to_string(),
            RecordError::UnparseableDate("soon".to_string()).to_string(),
            RecordError::NonexistentLocalTime("2025-03-09 02:30:00".to_string()).to_string(),
            ConfigError::Duration("0".to_string()).to_string(),
            FetchError::Status { code: 500, url: "http://x".to_string() }.to_string(),
        ];
        for m in &messages {
            assert!(m.chars().next().is_some_and(char::is_uppercase), "message was: {}", m);
        }
        assert_eq!(messages[0], "Record has no date");
    }
}
