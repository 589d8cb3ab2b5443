use axum::{extract::State, response::Json, routing::get, Router};
use log::info;
use shared::{ColumnPreferences, KpiTargets};

use super::error::ApiError;
use crate::AppState;

/// Create a router for preference APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kpi-targets", get(get_kpi_targets).put(put_kpi_targets))
        .route("/columns", get(get_columns).put(put_columns))
}

async fn get_kpi_targets(State(state): State<AppState>) -> Result<Json<KpiTargets>, ApiError> {
    info!("GET /api/preferences/kpi-targets");
    Ok(Json(state.preference_service.get_kpi_targets()?))
}

async fn put_kpi_targets(
    State(state): State<AppState>,
    Json(targets): Json<KpiTargets>,
) -> Result<Json<KpiTargets>, ApiError> {
    info!("PUT /api/preferences/kpi-targets - request: {:?}", targets);
    state.preference_service.set_kpi_targets(&targets)?;
    Ok(Json(targets))
}

async fn get_columns(State(state): State<AppState>) -> Result<Json<ColumnPreferences>, ApiError> {
    info!("GET /api/preferences/columns");
    Ok(Json(state.preference_service.get_column_preferences()?))
}

async fn put_columns(
    State(state): State<AppState>,
    Json(preferences): Json<ColumnPreferences>,
) -> Result<Json<ColumnPreferences>, ApiError> {
    info!("PUT /api/preferences/columns - request: {:?}", preferences);
    state.preference_service.set_column_preferences(&preferences)?;
    Ok(Json(state.preference_service.get_column_preferences()?))
}
