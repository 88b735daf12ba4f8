pub mod routes;

use crate::auth::AuthToken;
use crate::common::persist_in_background;
use crate::{ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cup_core::{NewsDraft, NewsItem, NewsPatch};
use serde_json::json;

/// Newest first.
pub async fn news_list_action(State(state): State<AppData>) -> ApiResult<Json<Vec<NewsItem>>> {
    Ok(Json(state.store.news().await))
}

pub async fn news_create_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Json(draft): Json<NewsDraft>,
) -> ApiResult<impl IntoResponse> {
    let item = state.store.create_news(draft).await;
    persist_in_background(&state);

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn news_update_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
    Json(patch): Json<NewsPatch>,
) -> ApiResult<Json<NewsItem>> {
    let item = state.store.update_news(id, patch).await?;
    persist_in_background(&state);

    Ok(Json(item))
}

pub async fn news_delete_action(
    _auth: AuthToken,
    State(state): State<AppData>,
    Path(id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    state.store.delete_news(id).await?;
    persist_in_background(&state);

    Ok(Json(json!({ "message": "News item deleted" })))
}
