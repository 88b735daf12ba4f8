use crate::r#match::{Match, Scorer};
use itertools::Itertools;
use std::collections::HashMap;

/// A score increase on one side of a match, derived by diffing the
/// record before and after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEvent {
    pub team_id: u32,
    pub new_score: u8,
    /// Best-effort attribution. None when the score moved without a
    /// matching new scorer entry, or the entry could not be resolved.
    pub scorer_id: Option<u32>,
}

/// Ordered multiset difference of two scorer lists, keyed by player id.
///
/// A count map of the old entries is consumed while scanning the new
/// list in order; entries whose old count is exhausted are the genuinely
/// new occurrences. A player scoring a second goal therefore shows up
/// once, even though the id appears twice in the new list.
pub fn added_scorers(old: &[Scorer], new: &[Scorer]) -> Vec<u32> {
    let mut remaining: HashMap<u32, usize> = old.iter().map(|s| s.player_id).counts();

    let mut added = Vec::new();

    for scorer in new {
        match remaining.get_mut(&scorer.player_id) {
            Some(count) if *count > 0 => *count -= 1,
            _ => added.push(scorer.player_id),
        }
    }

    added
}

/// Inspects a match update for score increases and attributes each one
/// to a scorer where possible. `player_team` resolves a player id to
/// its team so the added scorer entries can be assigned to the correct
/// side; resolution failure leaves the event unattributed rather than
/// failing it.
///
/// Both sides may fire from a single update. An update with no score
/// increase emits nothing, so re-running the detector on identical
/// records is a no-op.
pub fn detect_goals<F>(old: &Match, new: &Match, player_team: F) -> Vec<GoalEvent>
where
    F: Fn(u32) -> Option<u32>,
{
    let added = added_scorers(&old.scorers, &new.scorers);

    let mut events = Vec::new();

    let sides = [
        (new.team_home_id, old.score_home, new.score_home),
        (new.team_away_id, old.score_away, new.score_away),
    ];

    for (team_id, old_score, new_score) in sides {
        let new_score = new_score.unwrap_or(0);

        if new_score > old_score.unwrap_or(0) {
            let scorer_id = added
                .iter()
                .copied()
                .find(|&player_id| player_team(player_id) == Some(team_id));

            events.push(GoalEvent {
                team_id,
                new_score,
                scorer_id,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::{MatchStatus, Stage};
    use chrono::NaiveDate;

    fn base_match() -> Match {
        Match {
            id: 3,
            group: Stage::GroupA,
            team_home_id: 1,
            team_away_id: 2,
            score_home: None,
            score_away: None,
            status: MatchStatus::InProgress,
            date: NaiveDate::from_ymd_opt(2026, 6, 12)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
            match_day: 2,
            scorers: Vec::new(),
            cards: Vec::new(),
        }
    }

    fn scorers(ids: &[u32]) -> Vec<Scorer> {
        ids.iter().map(|&player_id| Scorer { player_id }).collect()
    }

    // Player ids 1xx play for team 1, 2xx for team 2.
    fn player_team(player_id: u32) -> Option<u32> {
        match player_id {
            100..200 => Some(1),
            200..300 => Some(2),
            _ => None,
        }
    }

    #[test]
    fn identical_records_emit_nothing() {
        let m = base_match();
        assert!(detect_goals(&m, &m.clone(), player_team).is_empty());

        let mut played = base_match();
        played.score_home = Some(2);
        played.scorers = scorers(&[101, 101]);
        assert!(detect_goals(&played, &played.clone(), player_team).is_empty());
    }

    #[test]
    fn home_goal_with_attribution() {
        let old = base_match();
        let mut new = base_match();
        new.score_home = Some(1);
        new.scorers = scorers(&[101]);

        let events = detect_goals(&old, &new, player_team);

        assert_eq!(
            events,
            vec![GoalEvent {
                team_id: 1,
                new_score: 1,
                scorer_id: Some(101),
            }]
        );
    }

    #[test]
    fn multiset_diff_flags_the_repeat_scorer() {
        let mut old = base_match();
        old.score_home = Some(2);
        old.scorers = scorers(&[101, 102]);

        let mut new = base_match();
        new.score_home = Some(3);
        new.scorers = scorers(&[101, 102, 101]);

        let events = detect_goals(&old, &new, player_team);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].scorer_id, Some(101));
    }

    #[test]
    fn score_bump_without_scorer_entry_still_fires() {
        let old = base_match();
        let mut new = base_match();
        new.score_home = Some(1);

        let events = detect_goals(&old, &new, player_team);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].team_id, 1);
        assert_eq!(events[0].scorer_id, None);
    }

    #[test]
    fn unknown_player_id_leaves_event_unattributed() {
        let old = base_match();
        let mut new = base_match();
        new.score_home = Some(1);
        new.scorers = scorers(&[999]);

        let events = detect_goals(&old, &new, player_team);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].scorer_id, None);
    }

    #[test]
    fn both_sides_fire_from_one_update() {
        let old = base_match();
        let mut new = base_match();
        new.score_home = Some(1);
        new.score_away = Some(1);
        new.scorers = scorers(&[101, 201]);

        let events = detect_goals(&old, &new, player_team);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].team_id, 1);
        assert_eq!(events[0].scorer_id, Some(101));
        assert_eq!(events[1].team_id, 2);
        assert_eq!(events[1].scorer_id, Some(201));
    }

    #[test]
    fn score_decrease_emits_nothing() {
        let mut old = base_match();
        old.score_home = Some(2);
        old.scorers = scorers(&[101, 102]);

        let mut new = base_match();
        new.score_home = Some(1);
        new.scorers = scorers(&[101]);

        assert!(detect_goals(&old, &new, player_team).is_empty());
    }
}
