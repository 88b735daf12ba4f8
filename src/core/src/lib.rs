pub mod r#match;
pub mod news;
mod patch;
pub mod session;
pub mod standings;
pub mod tournament;
pub mod workflow;

pub use news::{NewsDraft, NewsItem, NewsPatch};
pub use r#match::{
    Card, CardType, Match, MatchDraft, MatchPatch, MatchStatus, Scorer, Stage,
};
pub use session::{GoalScored, LiveSession, SessionEvent, Snapshot};
pub use standings::{ScorerRow, StandingsRow};
pub use tournament::{
    Group, Player, PlayerDraft, PlayerPatch, Team, TeamDraft, TeamPatch,
};
