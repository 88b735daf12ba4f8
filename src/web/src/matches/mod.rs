pub mod routes;

use crate::auth::AuthToken;
use crate::common::persist_in_background;
use crate::{ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cup_core::r#match::detect_goals;
use cup_core::{GoalScored, Match, MatchDraft, MatchPatch, Player, SessionEvent};
use log::info;
use serde_json::json;

pub async fn match_list_action(State(state): State<AppData>) -> ApiResult<Json<Vec<Match>>> {
    Ok(Json(state.store.matches().await))
}

pub async fn match_create_action(
    auth: AuthToken,
    State(state): State<AppData>,
    Json(draft): Json<MatchDraft>,
) -> ApiResult<impl IntoResponse> {
    let m = state.store.create_match(draft).await;
    persist_in_background(&state);

    info!("match created: {} by {}", m.id, auth.0.sub);
    state.hub.publish(SessionEvent::MatchUpdated(m.clone()));

    Ok((StatusCode::CREATED, Json(m)))
}

/// The update path carries the live-sync side effects: the store hands
/// back the pre-update record, the diff against it decides whether a
/// goal was scored, and both the raw update and any goal notifications
/// fan out to connected viewers. Broadcast delivery is fire-and-forget;
/// the response only depends on the store mutation.
pub async fn match_update_action(
    auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
    Json(patch): Json<MatchPatch>,
) -> ApiResult<Json<Match>> {
    let (old, new) = state.store.update_match(id, patch).await?;
    info!("match updated: {} by {}", id, auth.0.sub);
    persist_in_background(&state);

    state.hub.publish(SessionEvent::MatchUpdated(new.clone()));

    let players = state.store.players().await;
    let goals = detect_goals(&old, &new, |player_id| {
        players.iter().find(|p| p.id == player_id).map(|p| p.team_id)
    });

    for goal in goals {
        let scorer_name = goal.scorer_id.and_then(|scorer_id| {
            players
                .iter()
                .find(|p: &&Player| p.id == scorer_id)
                .map(|p| p.name.clone())
        });

        info!(
            "goal: match {}, team {}, score {}, scorer {}",
            new.id,
            goal.team_id,
            goal.new_score,
            scorer_name.as_deref().unwrap_or("unknown")
        );

        state.hub.publish(SessionEvent::GoalScored(GoalScored {
            match_id: new.id,
            team_id: goal.team_id,
            new_score: goal.new_score,
            scorer_name,
        }));
    }

    Ok(Json(new))
}

pub async fn match_delete_action(
    auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    state.store.delete_match(id).await?;
    persist_in_background(&state);

    info!("match deleted: {} by {}", id, auth.0.sub);

    state.hub.publish(SessionEvent::MatchDeleted(id));

    Ok(Json(json!({ "message": "Match deleted" })))
}
