//! # REST API for CSV import and export

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::ImportSummary;

use super::error::ApiError;
use super::parse_kind;
use crate::AppState;

/// Create a router for import / export APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import/:kind", post(import_csv))
        .route("/export/:kind", get(export_csv))
}

/// Body is the raw CSV text
async fn import_csv(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: String,
) -> Result<Json<ImportSummary>, ApiError> {
    info!("POST /api/import/{} - {} bytes", kind, body.len());
    let kind = parse_kind(&kind)?;
    Ok(Json(state.transfer_service.import_csv(kind, &body).await?))
}

async fn export_csv(State(state): State<AppState>, Path(kind): Path<String>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/export/{}", kind);
    let kind = parse_kind(&kind)?;

    let exported = state.transfer_service.export_csv(kind).await?;
    let disposition = format!("attachment; filename=\"{}\"", exported.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.content,
    ))
}
