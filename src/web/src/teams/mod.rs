pub mod routes;

use crate::auth::AuthToken;
use crate::common::persist_in_background;
use crate::{ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cup_core::{SessionEvent, Team, TeamDraft, TeamPatch};
use log::info;
use serde_json::json;

pub async fn team_list_action(State(state): State<AppData>) -> ApiResult<Json<Vec<Team>>> {
    Ok(Json(state.store.teams().await))
}

pub async fn team_create_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Json(draft): Json<TeamDraft>,
) -> ApiResult<impl IntoResponse> {
    let team = state.store.create_team(draft).await;
    persist_in_background(&state);

    info!("team created: {} ({})", team.name, team.id);
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn team_update_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
    Json(patch): Json<TeamPatch>,
) -> ApiResult<Json<Team>> {
    let team = state.store.update_team(id, patch).await?;
    persist_in_background(&state);

    Ok(Json(team))
}

/// Destructive cascade: the team's players and matches go with it.
/// Viewers learn about every removed match through the broadcast
/// channel so their snapshots stay consistent.
pub async fn team_delete_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let cascade = state.store.delete_team(id).await?;
    persist_in_background(&state);

    info!(
        "team {} deleted, cascading {} players and {} matches",
        cascade.team.id,
        cascade.removed_player_ids.len(),
        cascade.removed_match_ids.len()
    );

    for match_id in cascade.removed_match_ids {
        state.hub.publish(SessionEvent::MatchDeleted(match_id));
    }

    Ok(Json(json!({ "message": "Team deleted" })))
}
