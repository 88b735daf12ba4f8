pub mod routes;

use crate::auth::AuthToken;
use crate::common::persist_in_background;
use crate::{ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cup_core::standings::scorer_totals;
use cup_core::{Player, PlayerDraft, PlayerPatch};
use serde::Serialize;
use serde_json::json;

/// Player as reported by the API. The goals number is derived from the
/// scorer lists of completed matches on every read; it is never stored,
/// so it cannot drift from the match records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: u32,
    pub name: String,
    pub team_id: u32,
    pub goals: u32,
    pub is_captain: bool,
}

impl PlayerDto {
    fn derive(player: Player, goals: u32) -> Self {
        PlayerDto {
            id: player.id,
            name: player.name,
            team_id: player.team_id,
            goals,
            is_captain: player.is_captain,
        }
    }
}

pub async fn player_list_action(State(state): State<AppData>) -> ApiResult<Json<Vec<PlayerDto>>> {
    let players = state.store.players().await;
    let matches = state.store.matches().await;
    let totals = scorer_totals(&matches);

    let dtos = players
        .into_iter()
        .map(|p| {
            let goals = totals.get(&p.id).copied().unwrap_or(0);
            PlayerDto::derive(p, goals)
        })
        .collect();

    Ok(Json(dtos))
}

pub async fn player_create_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Json(draft): Json<PlayerDraft>,
) -> ApiResult<impl IntoResponse> {
    let player = state.store.create_player(draft).await;
    persist_in_background(&state);

    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn player_update_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
    Json(patch): Json<PlayerPatch>,
) -> ApiResult<Json<Player>> {
    let player = state.store.update_player(id, patch).await?;
    persist_in_background(&state);

    Ok(Json(player))
}

pub async fn player_delete_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    state.store.delete_player(id).await?;
    persist_in_background(&state);

    Ok(Json(json!({ "message": "Player deleted" })))
}
