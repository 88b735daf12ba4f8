pub mod routes;

use crate::{ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use cup_core::standings::{StandingsRow, calculate_standings, group_standings};
use cup_core::{Group, Team};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRowDto {
    pub team_id: u32,
    pub name: String,
    pub group: Group,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goal_difference: i32,
    pub points: u16,
}

fn resolve(rows: Vec<StandingsRow>, teams: &[Team]) -> Vec<StandingsRowDto> {
    rows.into_iter()
        .filter_map(|row| {
            let team = teams.iter().find(|t| t.id == row.team_id)?;
            Some(StandingsRowDto {
                team_id: row.team_id,
                name: team.name.clone(),
                group: team.group,
                played: row.played,
                won: row.won,
                drawn: row.drawn,
                lost: row.lost,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
                points: row.points,
            })
        })
        .collect()
}

pub async fn standings_action(
    State(state): State<AppData>,
) -> ApiResult<Json<Vec<StandingsRowDto>>> {
    let teams = state.store.teams().await;
    let matches = state.store.matches().await;

    let rows = calculate_standings(&teams, &matches);
    Ok(Json(resolve(rows, &teams)))
}

pub async fn group_standings_action(
    State(state): State<AppData>,
    Path(group): Path<Group>,
) -> ApiResult<Json<Vec<StandingsRowDto>>> {
    let teams = state.store.teams().await;
    let matches = state.store.matches().await;

    let rows = group_standings(&teams, &matches, group);
    Ok(Json(resolve(rows, &teams)))
}
