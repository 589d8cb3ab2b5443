/// Test utilities for storage-backed tests.
///
/// `TestEnvironment` owns a temporary directory that is removed when it is
/// dropped, even if the test panics.
use anyhow::Result;
use shared::{DatedItem, ItemKind};
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;

pub struct TestEnvironment {
    /// Kept alive so the directory is only removed on drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

pub fn sample_item(id: &str, kind: ItemKind, raw_date: &str) -> DatedItem {
    DatedItem {
        id: id.to_string(),
        title: format!("Item {}", id),
        category: "Umum".to_string(),
        raw_date: raw_date.to_string(),
        kind,
        process: "Draft".to_string(),
        pic: None,
    }
}
