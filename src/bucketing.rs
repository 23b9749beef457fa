//! Date bucketing over the client collection.
//!
//! Every function here is pure: it borrows the records it is given and
//! returns fresh groupings that point back into that slice.

use crate::models::{ClientRecord, MonthOption, PLANNED_SERVICE_DATE, SERVICE_DATE};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

/// Days after today still counted as upcoming (inclusive).
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

const MONTH_NAMES: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь", "Октябрь",
    "Ноябрь", "Декабрь",
];

/// Records grouped under `YYYY-MM-DD` keys, iterated in ascending date order.
pub type DateGroups<'a> = BTreeMap<String, Vec<&'a ClientRecord>>;

/// Parses a strict, zero-padded `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// The first non-empty of the planned and actual service dates, if it parses.
///
/// A malformed first value is not rescued by the second field.
pub fn usable_date(record: &ClientRecord) -> Option<NaiveDate> {
    let raw = [PLANNED_SERVICE_DATE, SERVICE_DATE]
        .into_iter()
        .filter_map(|name| record.field(name))
        .map(str::trim)
        .find(|value| !value.is_empty())?;

    let parsed = parse_date(raw);
    if parsed.is_none() {
        debug!(id = %record.id, value = raw, "skipping client with unparsable date");
    }
    parsed
}

/// Clients whose yearly service anniversary falls within
/// `[today, today + UPCOMING_WINDOW_DAYS]`, keyed by that occurrence.
pub fn upcoming_at(records: &[ClientRecord], today: NaiveDate) -> DateGroups<'_> {
    let window_end = today + Duration::days(UPCOMING_WINDOW_DAYS);
    let mut grouped = DateGroups::new();

    for record in records {
        let Some(next) = usable_date(record).and_then(|date| next_occurrence(date, today)) else {
            continue;
        };
        if next <= window_end {
            grouped.entry(date_key(next)).or_default().push(record);
        }
    }

    grouped
}

pub fn upcoming(records: &[ClientRecord]) -> DateGroups<'_> {
    upcoming_at(records, Local::now().date_naive())
}

/// One picker entry per month that has at least one dated client.
pub fn month_counts(records: &[ClientRecord]) -> Vec<MonthOption> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for date in records.iter().filter_map(usable_date) {
        *counts.entry((date.year(), date.month())).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((year, month), count)| MonthOption {
            label: month_label(year, month, count),
            value: format!("{year:04}-{month:02}"),
        })
        .collect()
}

/// Clients dated inside `month` (`YYYY-MM`), grouped by their exact date.
pub fn month_groups<'a>(records: &'a [ClientRecord], month: &str) -> DateGroups<'a> {
    let mut grouped = DateGroups::new();

    for record in records {
        let Some(date) = usable_date(record) else {
            continue;
        };
        if month_key(date) == month {
            grouped.entry(date_key(date)).or_default().push(record);
        }
    }

    grouped
}

pub fn month_label(year: i32, month: u32, count: usize) -> String {
    let name = MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{name} {year:04} ({count})")
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `date`'s month and day in `year`; Feb 29 becomes Feb 28 outside leap years.
fn anniversary(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day() - 1))
}

fn next_occurrence(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary(date, today.year())?;
    if this_year < today {
        anniversary(date, today.year() + 1)
    } else {
        Some(this_year)
    }
}
