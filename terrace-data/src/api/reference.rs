//! Reference data API handlers

use axum::{extract::State, routing::get, Json, Router};

use crate::db::countries::{list_countries, Country};
use crate::db::leagues::{list_leagues, League};
use crate::db::teams::{list_teams, Team};
use crate::error::ApiResult;
use crate::AppState;

/// GET /leagues
pub async fn index_leagues(State(state): State<AppState>) -> ApiResult<Json<Vec<League>>> {
    Ok(Json(list_leagues(&state.db).await?))
}

/// GET /teams
pub async fn index_teams(State(state): State<AppState>) -> ApiResult<Json<Vec<Team>>> {
    Ok(Json(list_teams(&state.db).await?))
}

/// GET /countries
pub async fn index_countries(State(state): State<AppState>) -> ApiResult<Json<Vec<Country>>> {
    Ok(Json(list_countries(&state.db).await?))
}

/// Build reference data routes
pub fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/leagues", get(index_leagues))
        .route("/teams", get(index_teams))
        .route("/countries", get(index_countries))
}
