//! Calendar helpers for the to-do screen.
//!
//! The day strip shows every day of the selected month and the agenda groups
//! tasks under a weekday header; both read their dates and labels from here.

use crate::model::date_key::DateKey;
use chrono::{Datelike, Months, NaiveDate};

/// Every day of the month containing `date`, first to last.
pub fn days_in_month(date: NaiveDate) -> Vec<NaiveDate> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect()
}

/// Same day `delta` months away, clamped to the end of the target month.
///
/// Returns `date` unchanged when the target is outside chrono's range.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Header for the month view, e.g. `February 2026`.
pub fn month_year_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Agenda section header, e.g. `Saturday, 21 February`.
pub fn agenda_header_label(key: &DateKey) -> String {
    key.date().format("%A, %-d %B").to_string()
}

/// Weekday abbreviation and day number for one card of the day strip,
/// e.g. `("SAT", "21")`.
pub fn day_card_labels(date: NaiveDate) -> (String, String) {
    (
        date.format("%a").to_string().to_uppercase(),
        date.day().to_string(),
    )
}
