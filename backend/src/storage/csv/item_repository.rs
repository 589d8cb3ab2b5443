use anyhow::Result;
use async_trait::async_trait;
use csv::{Reader, Writer};
use log::{debug, info, warn};
use shared::{DatedItem, ItemField, ItemKind};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::{Arc, Mutex, PoisonError};

use super::connection::{CsvConnection, ITEM_HEADER};
use crate::storage::traits::{ItemStorage, StorageError};

/// CSV-based item repository, one file per table
#[derive(Clone)]
pub struct ItemRepository {
    connection: CsvConnection,
    /// Serializes read-modify-write cycles so concurrent updates to
    /// different rows do not overwrite each other
    write_lock: Arc<Mutex<()>>,
}

impl ItemRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read all rows of a table from its CSV file
    fn read_items(&self, kind: ItemKind) -> Result<Vec<DatedItem>> {
        self.connection.ensure_table_exists(kind)?;

        let file = File::open(self.connection.table_path(kind))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut items = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let id = record.get(0).unwrap_or("");
            if id.is_empty() {
                warn!("Skipping row without id in {}", kind.table_name());
                continue;
            }

            let pic = record.get(5).unwrap_or("");
            items.push(DatedItem {
                id: id.to_string(),
                title: record.get(1).unwrap_or("").to_string(),
                category: record.get(2).unwrap_or("").to_string(),
                raw_date: record.get(3).unwrap_or("").to_string(),
                kind,
                process: record.get(4).unwrap_or("").to_string(),
                pic: if pic.is_empty() { None } else { Some(pic.to_string()) },
            });
        }

        Ok(items)
    }

    /// Write all rows of a table, atomically via a temp file
    fn write_items(&self, kind: ItemKind, items: &[DatedItem]) -> Result<()> {
        let file_path = self.connection.table_path(kind);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(ITEM_HEADER)?;
            for item in items {
                csv_writer.write_record([
                    item.id.as_str(),
                    item.title.as_str(),
                    item.category.as_str(),
                    item.raw_date.as_str(),
                    item.process.as_str(),
                    item.pic.as_deref().unwrap_or(""),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }

    /// Run a read-modify-write cycle on one table under the write lock
    fn modify<T>(&self, kind: ItemKind, change: impl FnOnce(&mut Vec<DatedItem>) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items(kind)?;
        let result = change(&mut items)?;
        self.write_items(kind, &items)?;
        Ok(result)
    }
}

#[async_trait]
impl ItemStorage for ItemRepository {
    async fn list_items(&self, kind: ItemKind) -> Result<Vec<DatedItem>> {
        let items = self.read_items(kind)?;
        debug!("Loaded {} rows from {}", items.len(), kind.table_name());
        Ok(items)
    }

    async fn get_item(&self, kind: ItemKind, id: &str) -> Result<Option<DatedItem>> {
        Ok(self.read_items(kind)?.into_iter().find(|item| item.id == id))
    }

    async fn store_item(&self, item: &DatedItem) -> Result<()> {
        self.modify(item.kind, |items| {
            if items.iter().any(|existing| existing.id == item.id) {
                return Err(StorageError::Duplicate {
                    table: item.kind.table_name(),
                    id: item.id.clone(),
                }
                .into());
            }
            items.push(item.clone());
            Ok(())
        })?;
        info!("Stored {} '{}' in {}", item.id, item.title, item.kind.table_name());
        Ok(())
    }

    async fn store_items(&self, kind: ItemKind, new_items: &[DatedItem]) -> Result<()> {
        self.modify(kind, |items| {
            let mut ids: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
            for item in new_items {
                if !ids.insert(item.id.as_str()) {
                    return Err(StorageError::Duplicate {
                        table: kind.table_name(),
                        id: item.id.clone(),
                    }
                    .into());
                }
            }
            items.extend(new_items.iter().cloned().map(|item| DatedItem { kind, ..item }));
            Ok(())
        })?;
        info!("Stored {} rows in {}", new_items.len(), kind.table_name());
        Ok(())
    }

    async fn update_field(&self, kind: ItemKind, id: &str, field: ItemField, value: &str) -> Result<()> {
        self.modify(kind, |items| {
            let item = items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| StorageError::NotFound {
                    table: kind.table_name(),
                    id: id.to_string(),
                })?;
            match field {
                ItemField::Date => item.raw_date = value.to_string(),
                ItemField::Process => item.process = value.to_string(),
            }
            Ok(())
        })?;
        info!(
            "Updated {}.{} of {} to '{}'",
            kind.table_name(),
            field.column_name(kind),
            id,
            value
        );
        Ok(())
    }

    async fn delete_item(&self, kind: ItemKind, id: &str) -> Result<bool> {
        let deleted = self.modify(kind, |items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            Ok(items.len() != before)
        })?;
        if deleted {
            info!("Deleted {} from {}", id, kind.table_name());
        }
        Ok(deleted)
    }
}
