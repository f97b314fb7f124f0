use serde::Deserialize;

/// Response of the stats API `/schedule` endpoint, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleDate {
    pub date: Option<String>,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: Option<i64>,
    pub game_date: Option<String>,
    pub official_date: Option<String>,
    #[serde(default)]
    pub teams: Option<GameTeams>,
    #[serde(default)]
    pub venue: Option<Named>,
    pub series_description: Option<String>,
    pub series_game_number: Option<u32>,
    #[serde(default)]
    pub status: Option<GameStatus>,
}

#[derive(Debug, Deserialize)]
pub struct GameTeams {
    pub away: Option<TeamSide>,
    pub home: Option<TeamSide>,
}

#[derive(Debug, Deserialize)]
pub struct TeamSide {
    pub team: Option<Named>,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub detailed_state: Option<String>,
}
