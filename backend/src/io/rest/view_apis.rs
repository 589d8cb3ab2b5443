//! # REST API for dashboard views
//!
//! Read-only aggregations: the activity heatmap, the Kanban board and the
//! analytics page. Rows that cannot be loaded leave the view empty and
//! raise a notification instead of failing the request.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;
use shared::{AnalyticsSummary, HeatmapYear, ItemKind, PipelineBoard};

use super::error::ApiError;
use super::{load_view_items, parse_kind};
use crate::domain::{analytics, heatmap, pipeline};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub year: i32,
    /// All tables when absent
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PipelineQuery {
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub year: i32,
    pub month_index: u32,
}

/// Create a router for view APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/heatmap", get(get_heatmap))
        .route("/pipeline", get(get_pipeline))
        .route("/analytics", get(get_analytics))
}

fn selected_kinds(kind: Option<&str>) -> Result<Vec<ItemKind>, ApiError> {
    match kind {
        Some(kind) => Ok(vec![parse_kind(kind)?]),
        None => Ok(ItemKind::ALL.to_vec()),
    }
}

async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<HeatmapYear>, ApiError> {
    info!("GET /api/heatmap - query: {:?}", query);

    let kinds = selected_kinds(query.kind.as_deref())?;
    let items = load_view_items(&state, &kinds).await;
    let counts = heatmap::build_year_counts(query.year, &items, |item| Some(item.raw_date.as_str()));
    Ok(Json(heatmap::summarize(query.year, counts)))
}

async fn get_pipeline(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> Result<Json<PipelineBoard>, ApiError> {
    info!("GET /api/pipeline - query: {:?}", query);

    let kinds = selected_kinds(query.kind.as_deref())?;
    let items = load_view_items(&state, &kinds).await;
    Ok(Json(pipeline::build_board(&items)))
}

async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    info!("GET /api/analytics - query: {:?}", query);

    if query.month_index > 11 {
        return Err(ApiError::BadRequest(format!("Invalid month index: {}", query.month_index)));
    }

    let targets = state.preference_service.get_kpi_targets()?;
    let items = load_view_items(&state, &ItemKind::ALL).await;
    Ok(Json(analytics::summarize(query.year, query.month_index, &items, &targets)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, test_state};
    use crate::storage::csv::test_utils::sample_item;
    use axum::{body::Body, http::Request, http::StatusCode};
    use shared::{IntensityLevel, KpiTargets, PipelineStage};
    use tower::util::ServiceExt; // for `oneshot`

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_heatmap_filters_by_kind() {
        let (_env, state) = test_state();
        for item in [
            sample_item("a", ItemKind::Press, "3 Januari 2025"),
            sample_item("b", ItemKind::Content, "3 Januari 2025"),
            sample_item("c", ItemKind::Content, "belum ada tanggal"),
        ] {
            state.item_storage.store_item(&item).await.unwrap();
        }
        let app = router().with_state(state);

        let all: HeatmapYear = read_json(get(app.clone(), "/heatmap?year=2025").await).await;
        assert_eq!(all.counts.get("2025-01-03"), Some(&2));
        assert_eq!(all.levels.get("2025-01-03"), Some(&IntensityLevel::Low));
        assert_eq!(all.total, 2);

        let press: HeatmapYear = read_json(get(app.clone(), "/heatmap?year=2025&kind=press").await).await;
        assert_eq!(press.total, 1);

        let response = get(app, "/heatmap?year=2025&kind=radio").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pipeline_board() {
        let (_env, state) = test_state();
        let mut published = sample_item("p", ItemKind::Content, "3 Januari 2025");
        published.process = "Sudah publish".to_string();
        state.item_storage.store_item(&published).await.unwrap();
        state
            .item_storage
            .store_item(&sample_item("d", ItemKind::Content, "4 Januari 2025"))
            .await
            .unwrap();
        let app = router().with_state(state);

        let board: PipelineBoard = read_json(get(app, "/pipeline?kind=content").await).await;
        let stages: Vec<PipelineStage> = board.columns.iter().map(|c| c.stage).collect();
        assert_eq!(stages, PipelineStage::ALL.to_vec());
        assert_eq!(board.columns[0].items[0].id, "d");
        assert_eq!(board.columns[3].items[0].id, "p");
    }

    #[tokio::test]
    async fn test_analytics_uses_saved_targets() {
        let (_env, state) = test_state();
        state
            .item_storage
            .store_item(&sample_item("a", ItemKind::Press, "3 Januari 2025"))
            .await
            .unwrap();
        let mut targets = KpiTargets::default();
        targets.monthly.insert(ItemKind::Press, 4);
        state.preference_service.set_kpi_targets(&targets).unwrap();
        let app = router().with_state(state);

        let summary: AnalyticsSummary = read_json(get(app.clone(), "/analytics?year=2025&month_index=0").await).await;
        assert_eq!(summary.monthly_counts[0], 1);
        assert_eq!(summary.kpi.len(), 1);
        assert_eq!(summary.kpi[0].percent, 25.0);

        let response = get(app, "/analytics?year=2025&month_index=12").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
