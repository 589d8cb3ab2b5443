use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Local;
use log::{info, warn};
use shared::{ItemKind, NotificationListResponse};

use super::error::ApiError;
use crate::AppState;

/// Create a router for notification APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id/read", post(mark_read))
}

/// Feed including reminders for media plans due soon
async fn list_notifications(State(state): State<AppState>) -> Json<NotificationListResponse> {
    info!("GET /api/notifications");

    match state.item_storage.list_items(ItemKind::Plan).await {
        Ok(plans) => {
            state.notification_service.refresh_plan_reminders(
                &plans,
                Local::now().date_naive(),
                state.reminder_days,
            );
        }
        Err(e) => warn!("Could not load media plans for reminders: {}", e),
    }

    Json(state.notification_service.list())
}

async fn mark_read(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    info!("POST /api/notifications/{}/read", id);

    if state.notification_service.mark_read(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("No notification with id '{}'", id)))
    }
}

async fn mark_all_read(State(state): State<AppState>) -> Result<Json<usize>, ApiError> {
    info!("POST /api/notifications/read-all");
    Ok(Json(state.notification_service.mark_all_read()?))
}
