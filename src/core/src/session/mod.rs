use crate::news::NewsItem;
use crate::r#match::Match;
use crate::standings::{self, ScorerRow, StandingsRow};
use crate::tournament::{Group, Player, Team};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long a goal flash stays visible on a viewer.
pub const GOAL_FLASH_DURATION: Duration = Duration::from_secs(6);

/// Goal notification payload as it travels over the broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalScored {
    pub match_id: u32,
    pub team_id: u32,
    pub new_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorer_name: Option<String>,
}

/// One broadcast channel message. The wire envelope is
/// `{"event": "...", "data": ...}` with the full match record,
/// a bare integer id, or the goal payload as the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum SessionEvent {
    MatchUpdated(Match),
    MatchDeleted(u32),
    GoalScored(GoalScored),
}

/// Full dataset a client fetches once at connect time. Deltas from the
/// broadcast channel keep it current afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub news: Vec<NewsItem>,
}

/// A transient goal celebration held by a session until it expires.
#[derive(Debug, Clone)]
pub struct GoalFlash {
    pub goal: GoalScored,
    pub seen_at: Instant,
}

impl GoalFlash {
    pub fn is_active(&self, now: Instant) -> bool {
        now.duration_since(self.seen_at) < GOAL_FLASH_DURATION
    }
}

/// A connected viewer's in-memory mirror of server state.
///
/// Holds only the raw snapshot; derived views (standings, scorer
/// totals) are recomputed on demand so they can never go stale. Event
/// application is idempotent: `MatchUpdated` replaces by id, so
/// re-applying a delivered message is harmless.
pub struct LiveSession {
    snapshot: Snapshot,
    flashes: Vec<GoalFlash>,
}

impl LiveSession {
    pub fn new(snapshot: Snapshot) -> Self {
        LiveSession {
            snapshot,
            flashes: Vec::new(),
        }
    }

    pub fn apply(&mut self, event: SessionEvent, now: Instant) {
        match event {
            SessionEvent::MatchUpdated(m) => {
                match self.snapshot.matches.iter_mut().find(|x| x.id == m.id) {
                    Some(existing) => *existing = m,
                    None => self.snapshot.matches.push(m),
                }
            }
            SessionEvent::MatchDeleted(id) => {
                self.snapshot.matches.retain(|m| m.id != id);
            }
            SessionEvent::GoalScored(goal) => {
                self.flashes.push(GoalFlash {
                    goal,
                    seen_at: now,
                });
            }
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn teams(&self) -> &[Team] {
        &self.snapshot.teams
    }

    pub fn matches(&self) -> &[Match] {
        &self.snapshot.matches
    }

    pub fn standings(&self) -> Vec<StandingsRow> {
        standings::calculate_standings(&self.snapshot.teams, &self.snapshot.matches)
    }

    pub fn group_standings(&self, group: Group) -> Vec<StandingsRow> {
        standings::group_standings(&self.snapshot.teams, &self.snapshot.matches, group)
    }

    pub fn top_scorers(&self) -> Vec<ScorerRow> {
        standings::top_scorers(&self.snapshot.players, &self.snapshot.matches)
    }

    /// Flashes still inside their display window.
    pub fn active_flashes(&self, now: Instant) -> impl Iterator<Item = &GoalFlash> {
        self.flashes.iter().filter(move |f| f.is_active(now))
    }

    pub fn purge_expired(&mut self, now: Instant) {
        self.flashes.retain(|f| f.is_active(now));
    }
}
