/// Text fields of one game exactly as found in the source, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGameRecord {
    pub date_text: String,
    pub time_text: Option<String>,
    pub away_team: String,
    pub home_team: String,
    pub venue: Option<String>,
    // Present when the source links or keys the game by its own id
    pub game_id: Option<String>,
    pub series: Option<String>,
    pub game_number: Option<u32>,
    pub status: Option<String>,
}
