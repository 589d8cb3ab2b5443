//! # Preference Repository
//!
//! File-based key-value store for UI preferences, kept in a single YAML file
//! `preferences.yaml` at the root of the data directory.
//!
//! ```yaml
//! read_notifications:
//!   - 5f1c...
//! kpi_targets:
//!   monthly:
//!     press: 12
//! ```
//!
//! Every change rewrites the file atomically (temp file, then rename).

use anyhow::Result;
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::sync::{Arc, Mutex, PoisonError};

use super::connection::CsvConnection;
use crate::storage::traits::PreferenceStorage;

type PreferenceMap = BTreeMap<String, Value>;

#[derive(Clone)]
pub struct PreferenceRepository {
    connection: CsvConnection,
    write_lock: Arc<Mutex<()>>,
}

impl PreferenceRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn load(&self) -> Result<PreferenceMap> {
        let path = self.connection.preferences_path();
        if !path.exists() {
            return Ok(PreferenceMap::new());
        }
        let yaml_content = fs::read_to_string(&path)?;
        if yaml_content.trim().is_empty() {
            return Ok(PreferenceMap::new());
        }
        let map: PreferenceMap = serde_yaml::from_str(&yaml_content)?;
        debug!("Loaded {} preferences from {:?}", map.len(), path);
        Ok(map)
    }

    fn save(&self, map: &PreferenceMap) -> Result<()> {
        let path = self.connection.preferences_path();
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, serde_yaml::to_string(map)?)?;
        fs::rename(&temp_path, &path)?;
        debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}

impl PreferenceStorage for PreferenceRepository {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.load()?;
        map.insert(key.to_string(), value);
        self.save(&map)?;
        info!("Saved preference '{}'", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.load()?;
        let existed = map.remove(key).is_some();
        if existed {
            self.save(&map)?;
        }
        Ok(existed)
    }
}
