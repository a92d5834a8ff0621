//! Month windows, month-over-month change, and money formatting.

use chrono::{Datelike, Months};

use crate::types::{Cents, Date};

/// A half-open calendar-month range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: Date,
    pub end: Date,
}

impl MonthWindow {
    /// The calendar month containing `day`.
    pub fn containing(day: Date) -> Self {
        let start = day.with_day(1).unwrap_or(day);
        let end = start + Months::new(1);
        Self { start, end }
    }

    /// The calendar month immediately before this one.
    pub fn previous(&self) -> Self {
        let start = self.start - Months::new(1);
        Self {
            start,
            end: self.start,
        }
    }
}

/// Month-over-month change in percent, rounded to one decimal.
///
/// A zero baseline yields `100.0` when anything was recorded this month and
/// `0.0` otherwise, so the dashboard never shows infinities.
pub fn percent_change(current: Cents, previous: Cents) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    let raw = (current - previous) as f64 / previous.abs() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Render an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(cents: Cents) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let units = (abs / 100).to_string();
    let frac = abs % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}
