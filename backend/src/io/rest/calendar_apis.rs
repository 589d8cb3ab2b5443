use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde::Deserialize;
use shared::{CalendarMonth, ItemKind, UpdateCalendarFocusRequest, UpdateCalendarFocusResponse};

use super::error::ApiError;
use super::load_view_items;
use crate::domain::date_parser::MONTH_NAMES;
use crate::AppState;

// Query parameters for calendar month API
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub year: i32,
    pub month_index: u32,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/current-date", get(get_current_date))
        .route("/focus-date", get(get_focus_date).post(set_focus_date))
        .route("/focus-date/previous", post(navigate_previous_month))
        .route("/focus-date/next", post(navigate_next_month))
}

/// Month grid with the items of every table placed on their days
async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthQuery>,
) -> Result<Json<CalendarMonth>, ApiError> {
    info!("GET /api/calendar/month - query: {:?}", query);

    let items = load_view_items(&state, &ItemKind::ALL).await;
    let calendar_month = state
        .calendar_service
        .generate_calendar_month(query.year, query.month_index, &items)?;
    Ok(Json(calendar_month))
}

async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = state.calendar_service.get_current_date();
    (StatusCode::OK, Json(current_date)).into_response()
}

async fn get_focus_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/focus-date");

    let focus_date = state.calendar_service.get_focus_date();
    (StatusCode::OK, Json(focus_date)).into_response()
}

async fn set_focus_date(
    State(state): State<AppState>,
    Json(request): Json<UpdateCalendarFocusRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendar/focus-date - request: {:?}", request);

    match state.calendar_service.set_focus_date(request.year, request.month_index) {
        Ok(focus_date) => {
            let response = UpdateCalendarFocusResponse {
                focus_date,
                success_message: format!("Calendar focus set to {} {}", month_label(focus_date.month_index), focus_date.year),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to set focus date: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

async fn navigate_previous_month(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/focus-date/previous");

    let focus_date = state.calendar_service.navigate_previous_month();
    let response = UpdateCalendarFocusResponse {
        focus_date,
        success_message: format!("Navigated to {} {}", month_label(focus_date.month_index), focus_date.year),
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn navigate_next_month(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/focus-date/next");

    let focus_date = state.calendar_service.navigate_next_month();
    let response = UpdateCalendarFocusResponse {
        focus_date,
        success_message: format!("Navigated to {} {}", month_label(focus_date.month_index), focus_date.year),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn month_label(month_index: u32) -> &'static str {
    MONTH_NAMES.get(month_index as usize).copied().unwrap_or("?")
}
