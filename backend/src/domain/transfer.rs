//! CSV import and export of table rows.
//!
//! Imports accept the spreadsheet headers editors actually use (Indonesian
//! or English, any case). Exports always use the fixed report header, which
//! the importer also understands.

use anyhow::Result;
use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, Writer};
use log::{info, warn};
use shared::{DatedItem, ImportSummary, ItemKind};
use std::sync::Arc;
use thiserror::Error;

use crate::storage::ItemStorage;

/// Header row of exported reports
pub const EXPORT_HEADER: [&str; 5] = ["Judul", "Kategori", "Tanggal", "Process", "PIC"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Column positions resolved from a header row
#[derive(Debug, Default, PartialEq)]
struct ColumnMap {
    title: Option<usize>,
    category: Option<usize>,
    date: Option<usize>,
    process: Option<usize>,
    pic: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let mut map = ColumnMap::default();
        for (index, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().as_str() {
                "judul" | "title" => &mut map.title,
                "kategori" | "category" => &mut map.category,
                "tanggal" | "date" | "tanggal_rencana" => &mut map.date,
                "process" | "status" => &mut map.process,
                "pic" => &mut map.pic,
                _ => continue,
            };
            // first matching column wins
            slot.get_or_insert(index);
        }

        if map.title.is_none() {
            return Err(ImportError::MissingColumn("judul"));
        }
        if map.date.is_none() {
            return Err(ImportError::MissingColumn("tanggal"));
        }
        Ok(map)
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Parse CSV text into new items of `kind`. Rows without a title are
/// skipped and counted. Every imported row gets a fresh id.
pub fn parse_import(kind: ItemKind, csv_text: &str) -> Result<(Vec<DatedItem>, usize), ImportError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(csv_text.as_bytes());
    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut items = Vec::new();
    let mut skipped = 0;
    for result in reader.records() {
        let record = result?;
        let title = cell(&record, columns.title);
        if title.is_empty() {
            skipped += 1;
            continue;
        }
        let pic = cell(&record, columns.pic);
        items.push(DatedItem {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            category: cell(&record, columns.category),
            raw_date: cell(&record, columns.date),
            kind,
            process: cell(&record, columns.process),
            pic: if pic.is_empty() { None } else { Some(pic) },
        });
    }
    Ok((items, skipped))
}

/// Render items as a report CSV
pub fn render_export(items: &[DatedItem]) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for item in items {
        writer.write_record([
            item.title.as_str(),
            item.category.as_str(),
            item.raw_date.as_str(),
            item.process.as_str(),
            item.pic.as_deref().unwrap_or(""),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedCsv {
    pub filename: String,
    pub content: String,
}

#[derive(Clone)]
pub struct TransferService {
    storage: Arc<dyn ItemStorage>,
}

impl TransferService {
    pub fn new(storage: Arc<dyn ItemStorage>) -> Self {
        Self { storage }
    }

    pub async fn import_csv(&self, kind: ItemKind, csv_text: &str) -> Result<ImportSummary> {
        let (items, skipped) = parse_import(kind, csv_text)?;
        if skipped > 0 {
            warn!("Import into {}: skipped {} rows without a title", kind.table_name(), skipped);
        }

        self.storage.store_items(kind, &items).await?;

        info!("Imported {} rows into {}", items.len(), kind.table_name());
        Ok(ImportSummary {
            imported: items.len(),
            skipped,
        })
    }

    pub async fn export_csv(&self, kind: ItemKind) -> Result<ExportedCsv> {
        let items = self.storage.list_items(kind).await?;
        let content = render_export(&items)?;
        let filename = format!("{}_{}.csv", kind.table_name(), Utc::now().format("%Y%m%d"));
        info!("Exported {} rows from {} as {}", items.len(), kind.table_name(), filename);
        Ok(ExportedCsv { filename, content })
    }
}
