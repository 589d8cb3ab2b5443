//! # REST API for table rows
//!
//! Listing, creating, deleting and single-field updates of press releases,
//! content items and media plans, plus the server-side drag-and-drop move.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use log::info;
use shared::{CreateItemRequest, DatedItem, RescheduleOutcome, RescheduleRequest, UpdateFieldRequest};

use super::error::ApiError;
use super::parse_kind;
use crate::domain::ItemBoard;
use crate::AppState;

/// Create a router for item related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:kind", get(list_items).post(create_item))
        .route("/:kind/:id", delete(delete_item).patch(update_field))
        .route("/:kind/:id/reschedule", post(reschedule_item))
}

async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<DatedItem>>, ApiError> {
    info!("GET /api/items/{}", kind);
    let kind = parse_kind(&kind)?;
    Ok(Json(state.item_storage.list_items(kind).await?))
}

async fn create_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/items/{} - request: {:?}", kind, request);
    let kind = parse_kind(&kind)?;

    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
    }

    let item = DatedItem {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        category: request.category,
        raw_date: request.raw_date,
        kind,
        process: request.process,
        pic: request.pic.filter(|pic| !pic.trim().is_empty()),
    };
    state.item_storage.store_item(&item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn delete_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /api/items/{}/{}", kind, id);
    let kind = parse_kind(&kind)?;

    if state.item_storage.delete_item(kind, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("No {} item with id '{}'", kind, id)))
    }
}

async fn update_field(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(request): Json<UpdateFieldRequest>,
) -> Result<Json<DatedItem>, ApiError> {
    info!("PATCH /api/items/{}/{} - request: {:?}", kind, id, request);
    let kind = parse_kind(&kind)?;

    state.item_storage.update_field(kind, &id, request.field, &request.value).await?;
    state
        .item_storage
        .get_item(kind, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No {} item with id '{}'", kind, id)))
}

/// Move an item to a calendar day or Kanban column. A failed write is
/// reported as a rolled back outcome, not as an HTTP error.
async fn reschedule_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(request): Json<RescheduleRequest>,
) -> Result<Json<RescheduleOutcome>, ApiError> {
    info!("POST /api/items/{}/{}/reschedule - target: {:?}", kind, id, request.target);
    let kind = parse_kind(&kind)?;

    let board = ItemBoard::shared(state.item_storage.list_items(kind).await?);
    let outcome = state.rescheduler.reschedule_drop(&board, &id, request.target).await?;
    Ok(Json(outcome))
}
