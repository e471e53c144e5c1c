//! Player import API handler

use axum::{extract::State, routing::post, Json, Router};

use crate::error::ApiResult;
use crate::models::{ImportSummary, RawImportQuery};
use crate::AppState;

/// POST /import/players
///
/// Import one page of players from the external provider. Membership
/// failures ride along inside the summary; only parameter, provider,
/// and upsert failures produce an error status.
pub async fn import_players(
    State(state): State<AppState>,
    Json(request): Json<RawImportQuery>,
) -> ApiResult<Json<ImportSummary>> {
    let summary = state.importer.import_page(&request).await?;
    Ok(Json(summary))
}

/// Build import routes
pub fn import_routes() -> Router<AppState> {
    Router::new().route("/import/players", post(import_players))
}
