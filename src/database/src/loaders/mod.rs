use cup_core::{Match, NewsItem, Player, Team};

const STATIC_TEAMS_JSON: &str = include_str!("../data/teams.json");
const STATIC_PLAYERS_JSON: &str = include_str!("../data/players.json");
const STATIC_MATCHES_JSON: &str = include_str!("../data/matches.json");
const STATIC_NEWS_JSON: &str = include_str!("../data/news.json");

/// Embedded seed dataset, used when a collection file is absent from
/// the data directory.
pub struct SeedData;

impl SeedData {
    pub fn teams() -> Vec<Team> {
        serde_json::from_str(STATIC_TEAMS_JSON).expect("invalid embedded teams.json")
    }

    pub fn players() -> Vec<Player> {
        serde_json::from_str(STATIC_PLAYERS_JSON).expect("invalid embedded players.json")
    }

    pub fn matches() -> Vec<Match> {
        serde_json::from_str(STATIC_MATCHES_JSON).expect("invalid embedded matches.json")
    }

    pub fn news() -> Vec<NewsItem> {
        serde_json::from_str(STATIC_NEWS_JSON).expect("invalid embedded news.json")
    }
}
