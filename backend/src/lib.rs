//! # Press Dashboard Backend
//!
//! Non-UI logic of the press release and COMMANDO content dashboard.
//!
//! ## Architecture
//!
//! ```text
//! Web UI
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (date parsing, calendar, pipeline, reschedule, analytics)
//!     ↓
//! Storage Layer (CSV tables, YAML preferences)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use shared::ItemKind;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::domain::{CalendarService, NotificationService, PreferenceService, Rescheduler, TransferService};
use crate::io::rest::{calendar_apis, item_apis, notification_apis, preference_apis, transfer_apis, view_apis};
use crate::storage::{CsvConnection, ItemRepository, ItemStorage, PreferenceRepository, PreferenceStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub item_storage: Arc<dyn ItemStorage>,
    pub calendar_service: CalendarService,
    pub notification_service: NotificationService,
    pub preference_service: PreferenceService,
    pub rescheduler: Rescheduler,
    pub transfer_service: TransferService,
    /// Look-ahead window of media plan reminders
    pub reminder_days: u32,
}

/// Wire the services over one data directory
pub fn build_state(connection: CsvConnection, reminder_days: u32) -> AppState {
    let item_storage: Arc<dyn ItemStorage> = Arc::new(ItemRepository::new(connection.clone()));
    let preference_storage: Arc<dyn PreferenceStorage> = Arc::new(PreferenceRepository::new(connection));

    let notification_service = NotificationService::new(preference_storage.clone());
    let rescheduler = Rescheduler::new(item_storage.clone(), Arc::new(notification_service.clone()));

    AppState {
        calendar_service: CalendarService::new(),
        preference_service: PreferenceService::new(preference_storage),
        transfer_service: TransferService::new(item_storage.clone()),
        notification_service,
        rescheduler,
        item_storage,
        reminder_days,
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up data directory {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)?;
    for kind in ItemKind::ALL {
        connection.ensure_table_exists(kind)?;
    }

    info!("Setting up domain services");
    Ok(build_state(connection, config.reminder_days))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/items", item_apis::router())
        .nest("/calendar", calendar_apis::router())
        .nest("/preferences", preference_apis::router())
        .merge(view_apis::router())
        .merge(notification_apis::router())
        .merge(transfer_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::util::ServiceExt; // for `oneshot`

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().join("dashboard"),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            cors_origin: "http://localhost:8080".to_string(),
            reminder_days: 3,
        }
    }

    #[tokio::test]
    async fn test_initialize_creates_tables() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        initialize_backend(&config).unwrap();

        for table in ["press_releases.csv", "commando_contents.csv", "media_plans.csv"] {
            assert!(config.data_dir.join(table).exists(), "{} missing", table);
        }
    }

    #[tokio::test]
    async fn test_router_serves_every_area_under_api() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let app = create_router(initialize_backend(&config).unwrap(), &config.cors_origin).unwrap();

        for uri in [
            "/api/items/press",
            "/api/calendar/current-date",
            "/api/calendar/month?year=2025&month_index=0",
            "/api/heatmap?year=2025",
            "/api/pipeline",
            "/api/analytics?year=2025&month_index=0",
            "/api/notifications",
            "/api/preferences/columns",
            "/api/export/plan",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }
    }

    #[test]
    fn test_rejects_invalid_cors_origin() {
        let temp_dir = TempDir::new().unwrap();
        let state = build_state(CsvConnection::new(temp_dir.path()).unwrap(), 3);
        assert!(create_router(state, "bad\norigin").is_err());
    }
}
