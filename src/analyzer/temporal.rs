use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::model::Ticket;

/// Opened/closed activity for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTrendRow {
    pub date: NaiveDate,
    pub tickets_opened: usize,
    pub tickets_closed: usize,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// ISO 8601 week number.
    pub week: u32,
    /// Day of month.
    pub day: u32,
}

impl DailyTrendRow {
    fn new(date: NaiveDate, tickets_opened: usize, tickets_closed: usize) -> Self {
        Self {
            date,
            tickets_opened,
            tickets_closed,
            year: date.year(),
            month: date.month(),
            month_name: month_name(date.month()),
            week: date.iso_week().week(),
            day: date.day(),
        }
    }
}

/// Outer join of per-day open counts and per-day close counts.
///
/// Every date that appears as an open date or a close date yields exactly one
/// row; the missing side is 0. Rows are sorted by date ascending.
pub fn compute_daily_trend(tickets: &[Ticket]) -> Vec<DailyTrendRow> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();

    for t in tickets {
        days.entry(t.date_opened.date()).or_default().0 += 1;
        if let Some(closed_at) = t.date_closed() {
            days.entry(closed_at.date()).or_default().1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (opened, closed))| DailyTrendRow::new(date, opened, closed))
        .collect()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
