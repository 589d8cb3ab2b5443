//! Dashboard analytics.
//!
//! Everything here is computed in memory from rows that were already
//! fetched. Items whose date does not parse are left out of the date based
//! figures but still count towards the pipeline stages.

use shared::{AnalyticsSummary, CategoryCount, DatedItem, ItemKind, KpiProgress, KpiTargets, PipelineStage};
use std::collections::BTreeMap;

use super::date_parser::{self, IndonesianDate};
use super::pipeline::classify;

/// Label for rows with a blank category
pub const UNCATEGORIZED: &str = "Tanpa Kategori";

fn parsed_date(item: &DatedItem) -> Option<IndonesianDate> {
    let date = date_parser::parse(&item.raw_date)?;
    // Impossible calendar dates never count
    date.to_naive_date()?;
    Some(date)
}

/// Items per month of `year`, index 0 = January
pub fn monthly_counts(year: i32, items: &[DatedItem]) -> [u32; 12] {
    let mut counts = [0u32; 12];
    for date in items.iter().filter_map(parsed_date) {
        if date.year == year {
            if let Some(slot) = counts.get_mut(date.month_index as usize) {
                *slot += 1;
            }
        }
    }
    counts
}

/// Category counts for items dated in `year`, largest first, ties by name
pub fn category_counts(year: i32, items: &[DatedItem]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for item in items {
        let in_year = parsed_date(item).map(|d| d.year == year).unwrap_or(false);
        if !in_year {
            continue;
        }
        let category = item.category.trim();
        let key = if category.is_empty() { UNCATEGORIZED } else { category };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }

    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    // BTreeMap order already sorts by name; stable sort keeps it for ties
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories
}

/// Items per pipeline stage, every stage present
pub fn stage_counts(items: &[DatedItem]) -> BTreeMap<PipelineStage, u32> {
    let mut counts: BTreeMap<PipelineStage, u32> = PipelineStage::ALL.into_iter().map(|s| (s, 0)).collect();
    for item in items {
        *counts.entry(classify(&item.process)).or_insert(0) += 1;
    }
    counts
}

/// Actual vs. target for one month, one entry per kind with a target.
/// The percentage is not clamped; views cap it for display.
pub fn kpi_progress(year: i32, month_index: u32, items: &[DatedItem], targets: &KpiTargets) -> Vec<KpiProgress> {
    ItemKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let target = *targets.monthly.get(&kind)?;
            let actual = items
                .iter()
                .filter(|item| item.kind == kind)
                .filter_map(parsed_date)
                .filter(|date| date.is_in_month(year, month_index))
                .count() as u32;
            let percent = if target == 0 {
                0.0
            } else {
                f64::from(actual) * 100.0 / f64::from(target)
            };
            Some(KpiProgress {
                kind,
                target,
                actual,
                percent,
            })
        })
        .collect()
}

pub fn summarize(year: i32, month_index: u32, items: &[DatedItem], targets: &KpiTargets) -> AnalyticsSummary {
    AnalyticsSummary {
        year,
        monthly_counts: monthly_counts(year, items),
        categories: category_counts(year, items),
        stages: stage_counts(items),
        kpi: kpi_progress(year, month_index, items, targets),
    }
}
