use anyhow::Result;
use log::info;
use shared::ItemKind;
use std::fs;
use std::path::{Path, PathBuf};

/// Header shared by every table file
pub const ITEM_HEADER: [&str; 6] = ["id", "title", "category", "date", "process", "pic"];

/// CsvConnection manages the data directory holding one CSV file per table
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection, creating the directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn table_path(&self, kind: ItemKind) -> PathBuf {
        self.base_directory.join(format!("{}.csv", kind.table_name()))
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.base_directory.join("preferences.yaml")
    }

    /// Create an empty table file with just the header row
    pub fn ensure_table_exists(&self, kind: ItemKind) -> Result<()> {
        let path = self.table_path(kind);
        if !path.exists() {
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(ITEM_HEADER)?;
            writer.flush()?;
            info!("Created table file: {}", path.display());
        }
        Ok(())
    }
}
