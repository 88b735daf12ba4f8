pub mod detect;

pub use detect::{GoalEvent, added_scorers, detect_goals};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stage label carried on a match. The group stage reuses the pool
/// letters, the knockout rounds carry their own labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "A")]
    GroupA,
    #[serde(rename = "B")]
    GroupB,
    #[serde(rename = "Semi Final")]
    SemiFinal,
    #[serde(rename = "Final")]
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    #[serde(rename = "inprogress")]
    InProgress,
    Completed,
}

/// One goal attribution entry. Ordering in the list records who scored
/// the Nth goal; there is no minute or timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scorer {
    pub player_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Card {
    pub player_id: u32,
    #[serde(rename = "type")]
    pub card_type: CardType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u32,
    pub group: Stage,
    pub team_home_id: u32,
    pub team_away_id: u32,
    /// None means the side has not played yet.
    pub score_home: Option<u8>,
    pub score_away: Option<u8>,
    pub status: MatchStatus,
    pub date: NaiveDateTime,
    /// 1-5 group stage, 6 semifinal, 7 final.
    pub match_day: u8,
    #[serde(default)]
    pub scorers: Vec<Scorer>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchDraft {
    pub group: Stage,
    pub team_home_id: u32,
    pub team_away_id: u32,
    #[serde(default)]
    pub score_home: Option<u8>,
    #[serde(default)]
    pub score_away: Option<u8>,
    pub status: MatchStatus,
    pub date: NaiveDateTime,
    pub match_day: u8,
    #[serde(default)]
    pub scorers: Vec<Scorer>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// Explicit set of mutable match fields. Scores are doubly optional:
/// an absent field leaves the score alone, an explicit null clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchPatch {
    pub group: Option<Stage>,
    pub team_home_id: Option<u32>,
    pub team_away_id: Option<u32>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub score_home: Option<Option<u8>>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub score_away: Option<Option<u8>>,
    pub status: Option<MatchStatus>,
    pub date: Option<NaiveDateTime>,
    pub match_day: Option<u8>,
    pub scorers: Option<Vec<Scorer>>,
    pub cards: Option<Vec<Card>>,
}

impl MatchPatch {
    /// True when applying the patch to `current` would alter score,
    /// scorers or cards. Writing back the values the match already
    /// holds does not count as a change.
    pub fn changes_events(&self, current: &Match) -> bool {
        self.score_home.is_some_and(|s| s != current.score_home)
            || self.score_away.is_some_and(|s| s != current.score_away)
            || self.scorers.as_ref().is_some_and(|s| *s != current.scorers)
            || self.cards.as_ref().is_some_and(|c| *c != current.cards)
    }

    /// True when the patch moves the match out of the completed state,
    /// which unlocks event edits in the same request.
    pub fn reopens(&self) -> bool {
        matches!(
            self.status,
            Some(MatchStatus::Scheduled) | Some(MatchStatus::InProgress)
        )
    }
}

impl Match {
    pub fn from_draft(id: u32, draft: MatchDraft) -> Self {
        Match {
            id,
            group: draft.group,
            team_home_id: draft.team_home_id,
            team_away_id: draft.team_away_id,
            score_home: draft.score_home,
            score_away: draft.score_away,
            status: draft.status,
            date: draft.date,
            match_day: draft.match_day,
            scorers: draft.scorers,
            cards: draft.cards,
        }
    }

    pub fn apply_patch(&mut self, patch: MatchPatch) {
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(team_home_id) = patch.team_home_id {
            self.team_home_id = team_home_id;
        }
        if let Some(team_away_id) = patch.team_away_id {
            self.team_away_id = team_away_id;
        }
        if let Some(score_home) = patch.score_home {
            self.score_home = score_home;
        }
        if let Some(score_away) = patch.score_away {
            self.score_away = score_away;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(match_day) = patch.match_day {
            self.match_day = match_day;
        }
        if let Some(scorers) = patch.scorers {
            self.scorers = scorers;
        }
        if let Some(cards) = patch.cards {
            self.cards = cards;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture(id: u32) -> Match {
        Match {
            id,
            group: Stage::GroupA,
            team_home_id: 1,
            team_away_id: 2,
            score_home: None,
            score_away: None,
            status: MatchStatus::Scheduled,
            date: NaiveDate::from_ymd_opt(2026, 6, 10)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            match_day: 1,
            scorers: Vec::new(),
            cards: Vec::new(),
        }
    }

    #[test]
    fn stage_labels_match_wire_format() {
        assert_eq!(serde_json::to_string(&Stage::GroupA).unwrap(), r#""A""#);
        assert_eq!(
            serde_json::to_string(&Stage::SemiFinal).unwrap(),
            r#""Semi Final""#
        );
        assert_eq!(
            serde_json::to_string(&MatchStatus::InProgress).unwrap(),
            r#""inprogress""#
        );
    }

    #[test]
    fn patch_score_absent_vs_null() {
        let mut m = fixture(1);
        m.score_home = Some(2);

        let leave: MatchPatch = serde_json::from_str(r#"{"status":"completed"}"#).unwrap();
        m.apply_patch(leave);
        assert_eq!(m.score_home, Some(2));
        assert_eq!(m.status, MatchStatus::Completed);

        let clear: MatchPatch = serde_json::from_str(r#"{"scoreHome":null}"#).unwrap();
        m.apply_patch(clear);
        assert_eq!(m.score_home, None);
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result: Result<MatchPatch, _> = serde_json::from_str(r#"{"id":7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn changes_events_and_reopens() {
        let mut m = fixture(1);
        m.score_home = Some(1);

        let p: MatchPatch = serde_json::from_str(r#"{"scoreHome":2}"#).unwrap();
        assert!(p.changes_events(&m));
        assert!(!p.reopens());

        let p: MatchPatch =
            serde_json::from_str(r#"{"status":"inprogress","scoreHome":2}"#).unwrap();
        assert!(p.reopens());

        let p: MatchPatch = serde_json::from_str(r#"{"date":"2026-06-11T20:00:00"}"#).unwrap();
        assert!(!p.changes_events(&m));
    }

    #[test]
    fn rewriting_identical_events_is_not_a_change() {
        let mut m = fixture(1);
        m.score_home = Some(2);
        m.score_away = Some(0);
        m.scorers.push(Scorer { player_id: 101 });

        // A full-field patch that echoes current values back.
        let p: MatchPatch = serde_json::from_str(
            r#"{"scoreHome":2,"scoreAway":0,"scorers":[{"playerId":101}],"cards":[],"date":"2026-06-12T20:00:00"}"#,
        )
        .unwrap();
        assert!(!p.changes_events(&m));

        let p: MatchPatch =
            serde_json::from_str(r#"{"scorers":[{"playerId":101},{"playerId":101}]}"#).unwrap();
        assert!(p.changes_events(&m));
    }

    #[test]
    fn match_round_trips_with_camel_case_keys() {
        let mut m = fixture(3);
        m.scorers.push(Scorer { player_id: 101 });
        m.cards.push(Card {
            player_id: 102,
            card_type: CardType::Yellow,
        });

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["teamHomeId"], 1);
        assert_eq!(json["scorers"][0]["playerId"], 101);
        assert_eq!(json["cards"][0]["type"], "yellow");
        assert_eq!(json["date"], "2026-06-10T18:00:00");

        let back: Match = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
    }
}
