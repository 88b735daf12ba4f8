use crate::r#match::{
    Card, CardType, Match, MatchDraft, MatchPatch, MatchStatus, Scorer, Stage,
};
use crate::tournament::{Player, Team};
use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The operation is only legal while a form is open.
    NotEditing,
    /// Score, scorer and card controls are locked on a completed match
    /// until its status is set back to scheduled or in progress.
    MatchCompleted,
    /// The team is already selected on the other side.
    TeamTaken(u32),
    /// Save requires both sides to be chosen.
    TeamsMissing,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::NotEditing => write!(f, "no match form is open"),
            EditError::MatchCompleted => {
                write!(f, "match is completed; reopen it before editing events")
            }
            EditError::TeamTaken(id) => {
                write!(f, "team {} is already selected on the other side", id)
            }
            EditError::TeamsMissing => write!(f, "both teams must be selected"),
        }
    }
}

/// The editable form contents while a match is open in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchForm {
    pub id: Option<u32>,
    pub stage: Stage,
    pub team_home_id: Option<u32>,
    pub team_away_id: Option<u32>,
    pub score_home: Option<u8>,
    pub score_away: Option<u8>,
    pub status: MatchStatus,
    pub date: NaiveDateTime,
    pub match_day: u8,
    pub scorers: Vec<Scorer>,
    pub cards: Vec<Card>,
}

/// "Who scored?" follow-up returned by a score increment. Candidates
/// are the players of the scoring team; answering with None records an
/// unattributed goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerPrompt {
    pub side: Side,
    pub candidates: Vec<u32>,
}

/// What a successful save should submit.
#[derive(Debug, Clone)]
pub enum SavePayload {
    Create(MatchDraft),
    Update(u32, MatchPatch),
}

/// Client-local admin edit state machine:
/// Viewing -> Editing -> Saving -> Viewing on success, or back to
/// Editing with a surfaced error on failure. Performs no I/O itself;
/// `begin_save` hands the payload to whoever talks to the server.
pub struct MatchEditor {
    teams: Vec<Team>,
    players: Vec<Player>,
    state: EditorState,
    form: Option<MatchForm>,
    error: Option<String>,
}

impl MatchEditor {
    pub fn new(teams: Vec<Team>, players: Vec<Player>) -> Self {
        MatchEditor {
            teams,
            players,
            state: EditorState::Viewing,
            form: None,
            error: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form(&self) -> Option<&MatchForm> {
        self.form.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open(&mut self, m: &Match) {
        self.form = Some(MatchForm {
            id: Some(m.id),
            stage: m.group,
            team_home_id: Some(m.team_home_id),
            team_away_id: Some(m.team_away_id),
            score_home: m.score_home,
            score_away: m.score_away,
            status: m.status,
            date: m.date,
            match_day: m.match_day,
            scorers: m.scorers.clone(),
            cards: m.cards.clone(),
        });
        self.error = None;
        self.state = EditorState::Editing;
    }

    pub fn open_new(&mut self, kickoff: NaiveDateTime) {
        self.form = Some(MatchForm {
            id: None,
            stage: Stage::GroupA,
            team_home_id: None,
            team_away_id: None,
            score_home: None,
            score_away: None,
            status: MatchStatus::Scheduled,
            date: kickoff,
            match_day: 1,
            scorers: Vec::new(),
            cards: Vec::new(),
        });
        self.error = None;
        self.state = EditorState::Editing;
    }

    pub fn close(&mut self) {
        self.form = None;
        self.error = None;
        self.state = EditorState::Viewing;
    }

    fn editing_form(&mut self) -> Result<&mut MatchForm, EditError> {
        if self.state != EditorState::Editing {
            return Err(EditError::NotEditing);
        }
        self.form.as_mut().ok_or(EditError::NotEditing)
    }

    /// Like `editing_form`, but also enforces the completed-match lock
    /// for score/scorer/card mutations.
    fn unlocked_form(&mut self) -> Result<&mut MatchForm, EditError> {
        let form = self.editing_form()?;
        if form.status == MatchStatus::Completed {
            return Err(EditError::MatchCompleted);
        }
        Ok(form)
    }

    pub fn set_status(&mut self, status: MatchStatus) -> Result<(), EditError> {
        self.editing_form()?.status = status;
        Ok(())
    }

    pub fn set_stage(&mut self, stage: Stage) -> Result<(), EditError> {
        self.editing_form()?.stage = stage;
        Ok(())
    }

    pub fn set_date(&mut self, date: NaiveDateTime) -> Result<(), EditError> {
        self.editing_form()?.date = date;
        Ok(())
    }

    pub fn set_match_day(&mut self, match_day: u8) -> Result<(), EditError> {
        self.editing_form()?.match_day = match_day;
        Ok(())
    }

    pub fn select_team(&mut self, side: Side, team_id: u32) -> Result<(), EditError> {
        let form = self.editing_form()?;

        let other = match side {
            Side::Home => form.team_away_id,
            Side::Away => form.team_home_id,
        };
        if other == Some(team_id) {
            return Err(EditError::TeamTaken(team_id));
        }

        match side {
            Side::Home => form.team_home_id = Some(team_id),
            Side::Away => form.team_away_id = Some(team_id),
        }
        Ok(())
    }

    /// Teams selectable as the home side: everyone not picked as away.
    pub fn home_team_options(&self) -> Vec<&Team> {
        let taken = self.form.as_ref().and_then(|f| f.team_away_id);
        self.teams.iter().filter(|t| Some(t.id) != taken).collect()
    }

    pub fn away_team_options(&self) -> Vec<&Team> {
        let taken = self.form.as_ref().and_then(|f| f.team_home_id);
        self.teams.iter().filter(|t| Some(t.id) != taken).collect()
    }

    /// Bumps one side's score and returns the "who scored?" prompt for
    /// it. The prompt is informational; the goal is only attributed
    /// once `attribute_goal` is answered.
    pub fn increment_score(&mut self, side: Side) -> Result<ScorerPrompt, EditError> {
        let form = self.unlocked_form()?;

        let (score, team_id) = match side {
            Side::Home => (&mut form.score_home, form.team_home_id),
            Side::Away => (&mut form.score_away, form.team_away_id),
        };
        *score = Some(score.unwrap_or(0).saturating_add(1));

        let candidates = match team_id {
            Some(team_id) => self
                .players
                .iter()
                .filter(|p| p.team_id == team_id)
                .map(|p| p.id)
                .collect(),
            None => Vec::new(),
        };

        Ok(ScorerPrompt { side, candidates })
    }

    /// Answers the scorer prompt. None records the goal as unattributed
    /// (the score already moved; no scorer entry is added).
    pub fn attribute_goal(&mut self, player_id: Option<u32>) -> Result<(), EditError> {
        let form = self.unlocked_form()?;
        if let Some(player_id) = player_id {
            form.scorers.push(Scorer { player_id });
        }
        Ok(())
    }

    /// Floored at zero.
    pub fn decrement_score(&mut self, side: Side) -> Result<(), EditError> {
        let form = self.unlocked_form()?;
        let score = match side {
            Side::Home => &mut form.score_home,
            Side::Away => &mut form.score_away,
        };
        if let Some(s) = score {
            *s = s.saturating_sub(1);
        }
        Ok(())
    }

    pub fn add_scorer(&mut self, player_id: u32) -> Result<(), EditError> {
        self.unlocked_form()?.scorers.push(Scorer { player_id });
        Ok(())
    }

    pub fn remove_scorer(&mut self, index: usize) -> Result<(), EditError> {
        let form = self.unlocked_form()?;
        if index < form.scorers.len() {
            form.scorers.remove(index);
        }
        Ok(())
    }

    pub fn add_card(&mut self, player_id: u32, card_type: CardType) -> Result<(), EditError> {
        self.unlocked_form()?.cards.push(Card {
            player_id,
            card_type,
        });
        Ok(())
    }

    pub fn toggle_card(&mut self, index: usize) -> Result<(), EditError> {
        let form = self.unlocked_form()?;
        if let Some(card) = form.cards.get_mut(index) {
            card.card_type = match card.card_type {
                CardType::Yellow => CardType::Red,
                CardType::Red => CardType::Yellow,
            };
        }
        Ok(())
    }

    pub fn remove_card(&mut self, index: usize) -> Result<(), EditError> {
        let form = self.unlocked_form()?;
        if index < form.cards.len() {
            form.cards.remove(index);
        }
        Ok(())
    }

    /// Validates the form and moves to Saving, yielding the payload the
    /// caller submits. On failure the editor stays in Editing.
    pub fn begin_save(&mut self) -> Result<SavePayload, EditError> {
        let form = self.editing_form()?;

        let (team_home_id, team_away_id) = match (form.team_home_id, form.team_away_id) {
            (Some(home), Some(away)) if home != away => (home, away),
            (Some(id), Some(_)) => return Err(EditError::TeamTaken(id)),
            _ => return Err(EditError::TeamsMissing),
        };

        let payload = match form.id {
            None => SavePayload::Create(MatchDraft {
                group: form.stage,
                team_home_id,
                team_away_id,
                score_home: form.score_home,
                score_away: form.score_away,
                status: form.status,
                date: form.date,
                match_day: form.match_day,
                scorers: form.scorers.clone(),
                cards: form.cards.clone(),
            }),
            Some(id) => SavePayload::Update(
                id,
                MatchPatch {
                    group: Some(form.stage),
                    team_home_id: Some(team_home_id),
                    team_away_id: Some(team_away_id),
                    score_home: Some(form.score_home),
                    score_away: Some(form.score_away),
                    status: Some(form.status),
                    date: Some(form.date),
                    match_day: Some(form.match_day),
                    scorers: Some(form.scorers.clone()),
                    cards: Some(form.cards.clone()),
                },
            ),
        };

        self.state = EditorState::Saving;
        self.error = None;
        Ok(payload)
    }

    pub fn save_succeeded(&mut self) {
        self.form = None;
        self.error = None;
        self.state = EditorState::Viewing;
    }

    /// Validation and authorization failures are recoverable: the form
    /// stays populated and the message is surfaced inline.
    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.state = EditorState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::Group;
    use chrono::NaiveDate;

    fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 10)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn team(id: u32, group: Group) -> Team {
        Team {
            id,
            name: format!("Team {}", id),
            group,
            colors: [String::from("#000"), String::from("#fff")],
            logo: String::from("⚽"),
        }
    }

    fn player(id: u32, team_id: u32) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            team_id,
            is_captain: false,
        }
    }

    fn editor() -> MatchEditor {
        MatchEditor::new(
            vec![team(1, Group::A), team(2, Group::A), team(3, Group::A)],
            vec![player(101, 1), player(102, 1), player(201, 2)],
        )
    }

    #[test]
    fn mutations_require_an_open_form() {
        let mut editor = editor();
        assert_eq!(editor.state(), EditorState::Viewing);
        assert_eq!(
            editor.increment_score(Side::Home),
            Err(EditError::NotEditing)
        );
        assert_eq!(
            editor.set_status(MatchStatus::Completed),
            Err(EditError::NotEditing)
        );
    }

    #[test]
    fn sides_are_mutually_exclusive() {
        let mut editor = editor();
        editor.open_new(kickoff());

        editor.select_team(Side::Home, 1).unwrap();
        assert_eq!(
            editor.select_team(Side::Away, 1),
            Err(EditError::TeamTaken(1))
        );
        editor.select_team(Side::Away, 2).unwrap();

        let away_ids: Vec<u32> = editor.away_team_options().iter().map(|t| t.id).collect();
        assert!(!away_ids.contains(&1));
        assert!(away_ids.contains(&2));
        let home_ids: Vec<u32> = editor.home_team_options().iter().map(|t| t.id).collect();
        assert!(!home_ids.contains(&2));
    }

    #[test]
    fn increment_prompts_with_the_scoring_teams_players() {
        let mut editor = editor();
        editor.open_new(kickoff());
        editor.select_team(Side::Home, 1).unwrap();
        editor.select_team(Side::Away, 2).unwrap();

        let prompt = editor.increment_score(Side::Home).unwrap();
        assert_eq!(prompt.side, Side::Home);
        assert_eq!(prompt.candidates, vec![101, 102]);
        assert_eq!(editor.form().unwrap().score_home, Some(1));

        // Unknown scorer: score moved, no entry recorded.
        editor.attribute_goal(None).unwrap();
        assert!(editor.form().unwrap().scorers.is_empty());

        editor.increment_score(Side::Home).unwrap();
        editor.attribute_goal(Some(101)).unwrap();
        assert_eq!(
            editor.form().unwrap().scorers,
            vec![Scorer { player_id: 101 }]
        );
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut editor = editor();
        editor.open_new(kickoff());

        editor.decrement_score(Side::Home).unwrap();
        assert_eq!(editor.form().unwrap().score_home, None);

        editor.increment_score(Side::Home).unwrap();
        editor.decrement_score(Side::Home).unwrap();
        assert_eq!(editor.form().unwrap().score_home, Some(0));

        editor.decrement_score(Side::Home).unwrap();
        assert_eq!(editor.form().unwrap().score_home, Some(0));
    }

    #[test]
    fn completed_status_locks_event_controls() {
        let mut editor = editor();
        editor.open_new(kickoff());
        editor.select_team(Side::Home, 1).unwrap();
        editor.select_team(Side::Away, 2).unwrap();
        editor.set_status(MatchStatus::Completed).unwrap();

        assert_eq!(
            editor.increment_score(Side::Home),
            Err(EditError::MatchCompleted)
        );
        assert_eq!(editor.add_scorer(101), Err(EditError::MatchCompleted));
        assert_eq!(
            editor.add_card(101, CardType::Yellow),
            Err(EditError::MatchCompleted)
        );

        // Status itself stays editable so the match can be reopened.
        editor.set_status(MatchStatus::InProgress).unwrap();
        editor.increment_score(Side::Home).unwrap();
    }

    #[test]
    fn card_type_toggles() {
        let mut editor = editor();
        editor.open_new(kickoff());

        editor.add_card(201, CardType::Yellow).unwrap();
        editor.toggle_card(0).unwrap();
        assert_eq!(editor.form().unwrap().cards[0].card_type, CardType::Red);
        editor.toggle_card(0).unwrap();
        assert_eq!(editor.form().unwrap().cards[0].card_type, CardType::Yellow);
    }

    #[test]
    fn save_requires_two_distinct_teams() {
        let mut editor = editor();
        editor.open_new(kickoff());

        assert!(matches!(
            editor.begin_save(),
            Err(EditError::TeamsMissing)
        ));
        assert_eq!(editor.state(), EditorState::Editing);

        editor.select_team(Side::Home, 1).unwrap();
        editor.select_team(Side::Away, 2).unwrap();

        let payload = editor.begin_save().unwrap();
        assert_eq!(editor.state(), EditorState::Saving);
        assert!(matches!(payload, SavePayload::Create(_)));
    }

    #[test]
    fn failed_save_returns_to_editing_with_the_message() {
        let mut editor = editor();
        editor.open_new(kickoff());
        editor.select_team(Side::Home, 1).unwrap();
        editor.select_team(Side::Away, 2).unwrap();

        editor.begin_save().unwrap();
        editor.save_failed("Forbidden: Invalid or expired token");

        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(
            editor.error(),
            Some("Forbidden: Invalid or expired token")
        );
        assert!(editor.form().is_some());

        editor.begin_save().unwrap();
        editor.save_succeeded();
        assert_eq!(editor.state(), EditorState::Viewing);
        assert!(editor.form().is_none());
        assert!(editor.error().is_none());
    }

    #[test]
    fn editing_existing_match_yields_an_update_patch() {
        let mut editor = editor();

        let m = Match {
            id: 7,
            group: Stage::GroupA,
            team_home_id: 1,
            team_away_id: 2,
            score_home: Some(1),
            score_away: Some(0),
            status: MatchStatus::InProgress,
            date: kickoff(),
            match_day: 3,
            scorers: vec![Scorer { player_id: 101 }],
            cards: Vec::new(),
        };

        editor.open(&m);
        editor.increment_score(Side::Home).unwrap();
        editor.attribute_goal(Some(102)).unwrap();

        match editor.begin_save().unwrap() {
            SavePayload::Update(id, patch) => {
                assert_eq!(id, 7);
                assert_eq!(patch.score_home, Some(Some(2)));
                assert_eq!(
                    patch.scorers.unwrap(),
                    vec![Scorer { player_id: 101 }, Scorer { player_id: 102 }]
                );
            }
            SavePayload::Create(_) => panic!("expected an update payload"),
        }
    }
}
