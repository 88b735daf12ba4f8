use crate::loaders::SeedData;
use cup_core::{
    Match, MatchDraft, MatchPatch, NewsDraft, NewsItem, NewsPatch, Player, PlayerDraft,
    PlayerPatch, Team, TeamDraft, TeamPatch,
};
use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

const TEAMS_FILE: &str = "teams.json";
const PLAYERS_FILE: &str = "players.json";
const MATCHES_FILE: &str = "matches.json";
const NEWS_FILE: &str = "news.json";

const TEAM_ID_SEED: u32 = 1;
const PLAYER_ID_SEED: u32 = 101;
const MATCH_ID_SEED: u32 = 1;
const NEWS_ID_SEED: u32 = 1;

#[derive(Debug)]
pub enum StoreError {
    TeamNotFound(u32),
    PlayerNotFound(u32),
    MatchNotFound(u32),
    NewsNotFound(u32),
    /// The match is completed and the patch edits score/scorers/cards
    /// without reopening it in the same request.
    MatchLocked(u32),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::TeamNotFound(id) => write!(f, "team {} not found", id),
            StoreError::PlayerNotFound(id) => write!(f, "player {} not found", id),
            StoreError::MatchNotFound(id) => write!(f, "match {} not found", id),
            StoreError::NewsNotFound(id) => write!(f, "news item {} not found", id),
            StoreError::MatchLocked(id) => write!(
                f,
                "match {} is completed; set it back to scheduled or inprogress to edit events",
                id
            ),
            StoreError::Io(err) => write!(f, "IO error: {}", err),
            StoreError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// Result of a cascading team delete.
#[derive(Debug, Clone)]
pub struct TeamCascade {
    pub team: Team,
    pub removed_player_ids: Vec<u32>,
    pub removed_match_ids: Vec<u32>,
}

#[derive(Default)]
struct Collections {
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    news: Vec<NewsItem>,
}

/// The document store behind the tournament: four collections guarded
/// by one RwLock. Mutations take the write lock for their whole
/// read-modify-write sequence, which serialises concurrent admin edits
/// and keeps the pre-update snapshot used for goal diffing consistent.
pub struct TournamentStore {
    data_dir: PathBuf,
    inner: RwLock<Collections>,
}

fn next_id(ids: impl Iterator<Item = u32>, seed: u32) -> u32 {
    ids.max().map(|max| max + 1).unwrap_or(seed)
}

async fn load_collection<T>(path: &Path, fallback: impl FnOnce() -> Vec<T>) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(items) => {
                info!("loaded {}", path.display());
                items
            }
            Err(err) => {
                warn!("invalid {}: {}; using seed data", path.display(), err);
                fallback()
            }
        },
        Err(_) => {
            info!("{} not found; using seed data", path.display());
            fallback()
        }
    }
}

impl TournamentStore {
    /// Reads collection files from `data_dir`, falling back to the
    /// embedded seed dataset for any that are missing or unreadable.
    pub async fn load(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();

        let collections = Collections {
            teams: load_collection(&data_dir.join(TEAMS_FILE), SeedData::teams).await,
            players: load_collection(&data_dir.join(PLAYERS_FILE), SeedData::players).await,
            matches: load_collection(&data_dir.join(MATCHES_FILE), SeedData::matches).await,
            news: load_collection(&data_dir.join(NEWS_FILE), SeedData::news).await,
        };

        info!(
            "store ready: {} teams, {} players, {} matches, {} news items",
            collections.teams.len(),
            collections.players.len(),
            collections.matches.len(),
            collections.news.len()
        );

        TournamentStore {
            data_dir,
            inner: RwLock::new(collections),
        }
    }

    /// Empty store for tests and tooling.
    pub fn empty(data_dir: impl Into<PathBuf>) -> Self {
        TournamentStore {
            data_dir: data_dir.into(),
            inner: RwLock::new(Collections::default()),
        }
    }

    /// Writes all four collections back to the data directory. Callers
    /// fire-and-forget this after mutations; a failed write is logged
    /// by the caller and never fails the originating request.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let (teams, players, matches, news) = {
            let guard = self.inner.read().await;
            (
                serde_json::to_string_pretty(&guard.teams)?,
                serde_json::to_string_pretty(&guard.players)?,
                serde_json::to_string_pretty(&guard.matches)?,
                serde_json::to_string_pretty(&guard.news)?,
            )
        };

        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::write(self.data_dir.join(TEAMS_FILE), teams).await?;
        tokio::fs::write(self.data_dir.join(PLAYERS_FILE), players).await?;
        tokio::fs::write(self.data_dir.join(MATCHES_FILE), matches).await?;
        tokio::fs::write(self.data_dir.join(NEWS_FILE), news).await?;

        Ok(())
    }

    // Teams

    pub async fn teams(&self) -> Vec<Team> {
        self.inner.read().await.teams.clone()
    }

    pub async fn create_team(&self, draft: TeamDraft) -> Team {
        let mut guard = self.inner.write().await;

        let team = Team {
            id: next_id(guard.teams.iter().map(|t| t.id), TEAM_ID_SEED),
            name: draft.name,
            group: draft.group,
            colors: draft.colors,
            logo: draft.logo,
        };

        guard.teams.push(team.clone());
        team
    }

    pub async fn update_team(&self, id: u32, patch: TeamPatch) -> Result<Team, StoreError> {
        let mut guard = self.inner.write().await;

        let team = guard
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TeamNotFound(id))?;

        team.apply_patch(patch);
        Ok(team.clone())
    }

    /// Deletes a team together with its players and every match it
    /// plays in. The removed match ids are reported so the caller can
    /// broadcast the corresponding deletions.
    pub async fn delete_team(&self, id: u32) -> Result<TeamCascade, StoreError> {
        let mut guard = self.inner.write().await;

        let position = guard
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TeamNotFound(id))?;
        let team = guard.teams.remove(position);

        let removed_player_ids: Vec<u32> = guard
            .players
            .iter()
            .filter(|p| p.team_id == id)
            .map(|p| p.id)
            .collect();
        guard.players.retain(|p| p.team_id != id);

        let removed_match_ids: Vec<u32> = guard
            .matches
            .iter()
            .filter(|m| m.team_home_id == id || m.team_away_id == id)
            .map(|m| m.id)
            .collect();
        guard
            .matches
            .retain(|m| m.team_home_id != id && m.team_away_id != id);

        Ok(TeamCascade {
            team,
            removed_player_ids,
            removed_match_ids,
        })
    }

    // Players

    pub async fn players(&self) -> Vec<Player> {
        self.inner.read().await.players.clone()
    }

    pub async fn create_player(&self, draft: PlayerDraft) -> Player {
        let mut guard = self.inner.write().await;

        let player = Player {
            id: next_id(guard.players.iter().map(|p| p.id), PLAYER_ID_SEED),
            name: draft.name,
            team_id: draft.team_id,
            is_captain: draft.is_captain,
        };

        guard.players.push(player.clone());
        player
    }

    pub async fn update_player(&self, id: u32, patch: PlayerPatch) -> Result<Player, StoreError> {
        let mut guard = self.inner.write().await;

        let player = guard
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::PlayerNotFound(id))?;

        player.apply_patch(patch);
        Ok(player.clone())
    }

    pub async fn delete_player(&self, id: u32) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;

        let before = guard.players.len();
        guard.players.retain(|p| p.id != id);

        if guard.players.len() == before {
            return Err(StoreError::PlayerNotFound(id));
        }
        Ok(())
    }

    // Matches

    pub async fn matches(&self) -> Vec<Match> {
        self.inner.read().await.matches.clone()
    }

    pub async fn match_by_id(&self, id: u32) -> Option<Match> {
        self.inner
            .read()
            .await
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub async fn create_match(&self, draft: MatchDraft) -> Match {
        let mut guard = self.inner.write().await;

        let id = next_id(guard.matches.iter().map(|m| m.id), MATCH_ID_SEED);
        let m = Match::from_draft(id, draft);

        guard.matches.push(m.clone());
        m
    }

    /// Applies the patch and returns the record before and after it.
    ///
    /// The old snapshot is taken under the same write lock that applies
    /// the patch, so the diff the goal detector runs on can never be
    /// stale, even with concurrent admins.
    pub async fn update_match(
        &self,
        id: u32,
        patch: MatchPatch,
    ) -> Result<(Match, Match), StoreError> {
        let mut guard = self.inner.write().await;

        let m = guard
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::MatchNotFound(id))?;

        if m.status == cup_core::MatchStatus::Completed
            && !patch.reopens()
            && patch.changes_events(m)
        {
            return Err(StoreError::MatchLocked(id));
        }

        let old = m.clone();
        m.apply_patch(patch);
        Ok((old, m.clone()))
    }

    pub async fn delete_match(&self, id: u32) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;

        let before = guard.matches.len();
        guard.matches.retain(|m| m.id != id);

        if guard.matches.len() == before {
            return Err(StoreError::MatchNotFound(id));
        }
        Ok(())
    }

    // News

    /// Newest first.
    pub async fn news(&self) -> Vec<NewsItem> {
        let mut items = self.inner.read().await.news.clone();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    pub async fn create_news(&self, draft: NewsDraft) -> NewsItem {
        let mut guard = self.inner.write().await;

        let item = NewsItem {
            id: next_id(guard.news.iter().map(|n| n.id), NEWS_ID_SEED),
            title: draft.title,
            summary: draft.summary,
            image: draft.image,
            content: draft.content,
            date: draft.date,
        };

        guard.news.push(item.clone());
        item
    }

    pub async fn update_news(&self, id: u32, patch: NewsPatch) -> Result<NewsItem, StoreError> {
        let mut guard = self.inner.write().await;

        let item = guard
            .news
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NewsNotFound(id))?;

        item.apply_patch(patch);
        Ok(item.clone())
    }

    pub async fn delete_news(&self, id: u32) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;

        let before = guard.news.len();
        guard.news.retain(|n| n.id != id);

        if guard.news.len() == before {
            return Err(StoreError::NewsNotFound(id));
        }
        Ok(())
    }
}
