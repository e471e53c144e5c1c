//! Player read API handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::players::{get_player, Player};
use crate::db::squads::squad_for_team;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /players/:id
pub async fn show_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Player>> {
    match get_player(&state.db, id).await? {
        Some(player) => Ok(Json(player)),
        None => Err(ApiError::NotFound(format!("Player {} not found", id))),
    }
}

/// Query for GET /teams/:id/squad
#[derive(Debug, Deserialize)]
pub struct SquadQuery {
    pub season: i64,
    pub league: Option<i64>,
}

/// GET /teams/:id/squad?season=&league=
pub async fn show_squad(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
    Query(query): Query<SquadQuery>,
) -> ApiResult<Json<Vec<Player>>> {
    let squad = squad_for_team(&state.db, team_id, query.season, query.league).await?;
    Ok(Json(squad))
}

/// Build player routes
pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/players/:id", get(show_player))
        .route("/teams/:id/squad", get(show_squad))
}
