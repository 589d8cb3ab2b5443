//! # REST API Interface Layer
//!
//! HTTP endpoints for the dashboard web UI. Handlers only translate between
//! JSON and the domain services; no business rules live here.
//!
//! ## Error mapping
//!
//! - Unknown item kinds and invalid input: 400
//! - Missing rows and notifications: 404
//! - Duplicate ids: 409
//! - Backend failures: 500 with the failure message
//!
//! View endpoints (calendar, heatmap, pipeline, analytics) are the
//! exception: a table that cannot be read is rendered as empty and the
//! failure is reported through the notification feed.

pub mod calendar_apis;
pub mod error;
pub mod item_apis;
pub mod notification_apis;
pub mod preference_apis;
pub mod transfer_apis;
pub mod view_apis;

use log::error;
use shared::{DatedItem, ItemKind, NotificationLevel};

pub use error::ApiError;

use crate::domain::NotificationSink;
use crate::AppState;

pub(crate) fn parse_kind(kind: &str) -> Result<ItemKind, ApiError> {
    ItemKind::parse(kind).ok_or_else(|| ApiError::BadRequest(format!("Unknown item kind '{}'", kind)))
}

/// Rows of the given tables for a read-only view
pub(crate) async fn load_view_items(state: &AppState, kinds: &[ItemKind]) -> Vec<DatedItem> {
    let mut items = Vec::new();
    for kind in kinds {
        match state.item_storage.list_items(*kind).await {
            Ok(rows) => items.extend(rows),
            Err(e) => {
                error!("Failed to load {}: {}", kind.table_name(), e);
                state.notification_service.notify(
                    NotificationLevel::Error,
                    format!("Gagal memuat data {}: {}", kind.table_name(), e),
                );
            }
        }
    }
    items
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::sample_item;
    use std::fs;

    #[tokio::test]
    async fn test_unreadable_table_renders_empty_with_notification() {
        let (env, state) = test_support::test_state();
        state
            .item_storage
            .store_item(&sample_item("a", ItemKind::Press, "3 Maret 2025"))
            .await
            .unwrap();
        // a directory where the table file should be cannot be opened as a file
        let content_path = env.connection.table_path(ItemKind::Content);
        fs::create_dir_all(&content_path).unwrap();

        let items = load_view_items(&state, &ItemKind::ALL).await;
        assert_eq!(items.len(), 1);

        let feed = state.notification_service.list();
        assert_eq!(feed.notifications.len(), 1);
        assert_eq!(feed.notifications[0].level, NotificationLevel::Error);
        assert!(feed.notifications[0].message.contains("commando_contents"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("plan").unwrap(), ItemKind::Plan);
        assert!(matches!(parse_kind("video"), Err(ApiError::BadRequest(_))));
    }
}
