use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use bobyx_core::game::{GameSummary, NewGame, SceneDetail, sort_newest_first};
use bobyx_core::time::timestamp_now;

use crate::error::AppError;
use crate::state::AppState;

/// Response for the game listing.
#[derive(Debug, Serialize)]
pub struct ListGamesResponse {
    pub games: Vec<GameSummary>,
}

/// Response for a successful create.
#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub id: String,
}

/// GET /api/games — every game, newest first, without scene or code.
pub async fn list_games(State(state): State<AppState>) -> Result<Json<ListGamesResponse>, AppError> {
    let records = state
        .store
        .list_all()
        .await
        .map_err(|e| AppError::store("Error retrieving games", e))?;

    let mut games: Vec<GameSummary> = records
        .into_iter()
        .map(|(id, fields)| GameSummary::from_record(id, fields))
        .collect();
    sort_newest_first(&mut games);

    Ok(Json(ListGamesResponse { games }))
}

/// POST /api/games — validate, allocate an id, then write the record.
///
/// Id allocation and the record write are separate store calls. If the
/// write fails the allocated id is simply never used.
pub async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<NewGame>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateGameResponse>), AppError> {
    let Json(body) = body.map_err(AppError::rejected)?;
    let draft = body
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = state
        .store
        .next_id()
        .await
        .map_err(|e| AppError::store("Error creating game", e))?;
    let fields = draft.into_fields(timestamp_now());
    state
        .store
        .create(&id, &fields)
        .await
        .map_err(|e| AppError::store("Error creating game", e))?;

    tracing::info!(id = %id, name = %fields.name, "Created game");
    Ok((StatusCode::CREATED, Json(CreateGameResponse { id })))
}

/// GET /api/games/{id}/scene — the scene and code payload of one game.
pub async fn get_game_scene(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SceneDetail>, AppError> {
    let fields = state
        .store
        .get(&id)
        .await
        .map_err(|e| AppError::store("Error retrieving game", e))?
        .ok_or_else(|| AppError::NotFound("not found".to_string()))?;
    Ok(Json(SceneDetail::from(fields)))
}
