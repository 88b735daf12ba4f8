use crate::r#match::{Match, MatchStatus};
use crate::tournament::{Group, Player, Team};
use std::collections::HashMap;

/// One row of a ranking table. Exists only as calculator output and is
/// never persisted; a stored copy would be stale by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandingsRow {
    pub team_id: u32,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goal_difference: i32,
    pub points: u16,
}

/// Derives a ranking table from the current team and match state.
///
/// Pure function of its inputs: only completed matches count, a missing
/// score is treated as 0, and the output is sorted descending by
/// (points, goal difference, goals for). The sort is stable, so teams
/// tied on all three keys keep input order. Matches referencing a team
/// id outside `teams` are skipped.
pub fn calculate_standings(teams: &[Team], matches: &[Match]) -> Vec<StandingsRow> {
    let order: Vec<u32> = teams.iter().map(|t| t.id).collect();
    let mut rows: HashMap<u32, StandingsRow> = teams
        .iter()
        .map(|t| {
            (
                t.id,
                StandingsRow {
                    team_id: t.id,
                    ..StandingsRow::default()
                },
            )
        })
        .collect();

    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        // Degenerate self-matches and unknown team ids are skipped.
        if m.team_home_id == m.team_away_id {
            continue;
        }
        let [Some(home), Some(away)] =
            rows.get_disjoint_mut([&m.team_home_id, &m.team_away_id])
        else {
            continue;
        };

        let score_home = m.score_home.unwrap_or(0) as u16;
        let score_away = m.score_away.unwrap_or(0) as u16;

        home.played += 1;
        home.goals_for += score_home;
        home.goals_against += score_away;
        away.played += 1;
        away.goals_for += score_away;
        away.goals_against += score_home;

        if score_home > score_away {
            home.won += 1;
            home.points += 3;
            away.lost += 1;
        } else if score_away > score_home {
            away.won += 1;
            away.points += 3;
            home.lost += 1;
        } else {
            home.drawn += 1;
            home.points += 1;
            away.drawn += 1;
            away.points += 1;
        }
    }

    let mut table: Vec<StandingsRow> = order
        .into_iter()
        .map(|id| {
            let mut row = rows[&id];
            row.goal_difference = row.goals_for as i32 - row.goals_against as i32;
            row
        })
        .collect();

    table.sort_by(|a, b| {
        (b.points, b.goal_difference, b.goals_for).cmp(&(a.points, a.goal_difference, a.goals_for))
    });

    table
}

/// Standings for one group. Computed over the full team and match
/// lists and filtered afterwards, so a cross-group match still counts
/// toward a team's own record.
pub fn group_standings(teams: &[Team], matches: &[Match], group: Group) -> Vec<StandingsRow> {
    let mut rows = calculate_standings(teams, matches);
    rows.retain(|row| {
        teams
            .iter()
            .any(|t| t.id == row.team_id && t.group == group)
    });
    rows
}

/// Goal totals per player id, derived from scorer lists of completed
/// matches. This is the single source of truth for player goal counts.
pub fn scorer_totals(matches: &[Match]) -> HashMap<u32, u32> {
    let mut totals = HashMap::new();

    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        for scorer in &m.scorers {
            *totals.entry(scorer.player_id).or_insert(0) += 1;
        }
    }

    totals
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerRow {
    pub player_id: u32,
    pub team_id: u32,
    pub name: String,
    pub goals: u32,
}

/// Top-scorer list: players with at least one goal, sorted descending
/// by goal count. Stable, so equal tallies keep player input order.
pub fn top_scorers(players: &[Player], matches: &[Match]) -> Vec<ScorerRow> {
    let totals = scorer_totals(matches);

    let mut rows: Vec<ScorerRow> = players
        .iter()
        .filter_map(|p| {
            let goals = totals.get(&p.id).copied()?;
            Some(ScorerRow {
                player_id: p.id,
                team_id: p.team_id,
                name: p.name.clone(),
                goals,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.goals.cmp(&a.goals));

    rows
}
