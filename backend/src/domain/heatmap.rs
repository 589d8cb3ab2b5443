//! Year-long activity heatmap aggregation.

use shared::{HeatmapYear, IntensityLevel};
use std::collections::BTreeMap;

use super::date_parser;

/// Count items per day for one year, keyed by `YYYY-MM-DD`.
///
/// `date_field` picks the free-text date out of an item; items without a
/// date, with an unparseable date, or dated in another year are skipped.
pub fn build_year_counts<T, F>(year: i32, items: &[T], date_field: F) -> BTreeMap<String, u32>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        let key = date_field(item)
            .and_then(date_parser::parse)
            .filter(|parsed| parsed.year == year)
            .and_then(|parsed| parsed.iso_key());
        if let Some(key) = key {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Totals and per-day color buckets derived from the day counts
pub fn summarize(year: i32, counts: BTreeMap<String, u32>) -> HeatmapYear {
    let total = counts.values().sum();
    let active_days = counts.len() as u32;
    let levels = counts
        .iter()
        .map(|(day, count)| (day.clone(), intensity(*count)))
        .collect();
    HeatmapYear {
        year,
        counts,
        levels,
        total,
        active_days,
    }
}

/// Fixed color buckets: 0 / 1-2 / 3-5 / 6-10 / 11+
pub fn intensity(count: u32) -> IntensityLevel {
    match count {
        0 => IntensityLevel::None,
        1..=2 => IntensityLevel::Low,
        3..=5 => IntensityLevel::Medium,
        6..=10 => IntensityLevel::High,
        _ => IntensityLevel::Peak,
    }
}
