//! Calendar domain logic for the dashboard.
//!
//! Builds month grids from dated items and keeps the calendar focus month
//! used for navigation. The UI only renders the cells produced here; which
//! item lands on which day is decided by the Indonesian date parser.

use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};
use shared::{CalendarDay, CalendarFocusDate, CalendarMonth, CurrentDateResponse, DatedItem};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use super::date_parser::{self, format_indonesian_with_weekday, format_iso};

#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("Invalid month index: {0}. Must be between 0 and 11")]
    InvalidMonth(u32),
    #[error("Year {0} is out of range")]
    InvalidYear(i32),
}

/// Number of days in a month (month_index 0 = January)
pub fn days_in_month(year: i32, month_index: u32) -> u32 {
    match month_index {
        1 => if is_leap_year(year) { 29 } else { 28 },
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Weekday of the first of the month (0 = Sunday)
pub fn first_weekday(year: i32, month_index: u32) -> Result<u32, CalendarError> {
    if month_index > 11 {
        return Err(CalendarError::InvalidMonth(month_index));
    }
    NaiveDate::from_ymd_opt(year, month_index + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .ok_or(CalendarError::InvalidYear(year))
}

pub fn previous_month(year: i32, month_index: u32) -> (i32, u32) {
    if month_index == 0 {
        (year - 1, 11)
    } else {
        (year, month_index - 1)
    }
}

pub fn next_month(year: i32, month_index: u32) -> (i32, u32) {
    if month_index >= 11 {
        (year + 1, 0)
    } else {
        (year, month_index + 1)
    }
}

/// Build the grid for one month.
///
/// The grid starts with `first_weekday` padding cells followed by one cell
/// per day. Items whose date does not parse or falls outside the month are
/// left out. Items keep their input order within a cell.
pub fn build_month(
    year: i32,
    month_index: u32,
    items: &[DatedItem],
    today: NaiveDate,
) -> Result<CalendarMonth, CalendarError> {
    let first_weekday = first_weekday(year, month_index)?;
    let days_in_month = days_in_month(year, month_index);

    let mut days: Vec<CalendarDay> = (0..first_weekday)
        .map(|_| CalendarDay {
            day: None,
            items: Vec::new(),
            is_today: false,
        })
        .collect();

    let today_in_month = today.year() == year && today.month0() == month_index;
    days.extend((1..=days_in_month).map(|day| CalendarDay {
        day: Some(day),
        items: Vec::new(),
        is_today: today_in_month && today.day() == day,
    }));

    let offset = first_weekday as usize;
    let mut placed = 0usize;
    for item in items {
        let Some(parsed) = date_parser::parse(&item.raw_date) else {
            continue;
        };
        if !parsed.is_in_month(year, month_index) || parsed.day > days_in_month {
            continue;
        }
        days[offset + parsed.day as usize - 1].items.push(item.clone());
        placed += 1;
    }

    debug!(
        "Built calendar {}/{}: {} cells, {} of {} items placed",
        month_index + 1,
        year,
        days.len(),
        placed,
        items.len()
    );

    Ok(CalendarMonth {
        year,
        month_index,
        month_name: date_parser::MONTH_NAMES[month_index as usize].to_string(),
        first_weekday,
        days_in_month,
        days,
    })
}

/// Calendar service that owns the focus month for navigation
#[derive(Clone)]
pub struct CalendarService {
    /// Kept in memory only, never persisted
    current_focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl CalendarService {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            current_focus_date: Arc::new(Mutex::new(CalendarFocusDate {
                year: today.year(),
                month_index: today.month0(),
            })),
        }
    }

    /// Build a month grid with today's wall-clock date flagged
    pub fn generate_calendar_month(
        &self,
        year: i32,
        month_index: u32,
        items: &[DatedItem],
    ) -> Result<CalendarMonth, CalendarError> {
        info!("Generating calendar for {}/{} from {} items", month_index + 1, year, items.len());
        build_month(year, month_index, items, Local::now().date_naive())
    }

    pub fn get_current_date(&self) -> CurrentDateResponse {
        let today = Local::now().date_naive();
        CurrentDateResponse {
            year: today.year(),
            month_index: today.month0(),
            day: today.day(),
            formatted_date: format_indonesian_with_weekday(today),
            iso_date: format_iso(today),
        }
    }

    pub fn get_focus_date(&self) -> CalendarFocusDate {
        *self.current_focus_date.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_focus_date(&self, year: i32, month_index: u32) -> Result<CalendarFocusDate, CalendarError> {
        first_weekday(year, month_index)?;

        let focus = CalendarFocusDate { year, month_index };
        *self.current_focus_date.lock().unwrap_or_else(PoisonError::into_inner) = focus;
        Ok(focus)
    }

    pub fn navigate_previous_month(&self) -> CalendarFocusDate {
        self.shift_focus(previous_month)
    }

    pub fn navigate_next_month(&self) -> CalendarFocusDate {
        self.shift_focus(next_month)
    }

    fn shift_focus(&self, step: fn(i32, u32) -> (i32, u32)) -> CalendarFocusDate {
        let mut focus = self.current_focus_date.lock().unwrap_or_else(PoisonError::into_inner);
        let (year, month_index) = step(focus.year, focus.month_index);
        *focus = CalendarFocusDate { year, month_index };
        *focus
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
