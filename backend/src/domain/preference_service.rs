//! Typed access to persisted UI preferences.
//!
//! Values are loaded when asked for and saved on every change; nothing is
//! cached between calls, so two services sharing a store always agree.

use anyhow::Result;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ColumnPreferences, ItemKind, KpiTargets};
use std::sync::Arc;

use crate::storage::PreferenceStorage;

pub const READ_NOTIFICATIONS_KEY: &str = "read_notifications";
pub const KPI_TARGETS_KEY: &str = "kpi_targets";
pub const COLUMN_PREFERENCES_KEY: &str = "column_preferences";

pub fn load_value<T: DeserializeOwned>(store: &dyn PreferenceStorage, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub fn save_value<T: Serialize>(store: &dyn PreferenceStorage, key: &str, value: &T) -> Result<()> {
    store.set(key, serde_json::to_value(value)?)
}

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStorage>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStorage>) -> Self {
        Self { store }
    }

    pub fn get_kpi_targets(&self) -> Result<KpiTargets> {
        Ok(load_value(self.store.as_ref(), KPI_TARGETS_KEY)?.unwrap_or_default())
    }

    pub fn set_kpi_targets(&self, targets: &KpiTargets) -> Result<()> {
        info!("Updating KPI targets: {:?}", targets.monthly);
        save_value(self.store.as_ref(), KPI_TARGETS_KEY, targets)
    }

    /// Saved column choices, with every kind falling back to all columns
    pub fn get_column_preferences(&self) -> Result<ColumnPreferences> {
        let mut preferences: ColumnPreferences =
            load_value(self.store.as_ref(), COLUMN_PREFERENCES_KEY)?.unwrap_or_default();
        for kind in ItemKind::ALL {
            preferences
                .visible
                .entry(kind)
                .or_insert_with(|| default_columns(kind));
        }
        Ok(preferences)
    }

    pub fn set_column_preferences(&self, preferences: &ColumnPreferences) -> Result<()> {
        save_value(self.store.as_ref(), COLUMN_PREFERENCES_KEY, preferences)
    }
}

fn default_columns(kind: ItemKind) -> Vec<String> {
    let mut columns = vec!["title", "category", kind.date_column(), kind.process_column()];
    if kind == ItemKind::Plan {
        columns.push("pic");
    }
    columns.into_iter().map(str::to_string).collect()
}
