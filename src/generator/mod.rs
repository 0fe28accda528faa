pub mod provider;

pub use provider::{FakerProvider, ValueProvider};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::model::{Lifecycle, Status, Ticket};

/// Bounds of the resolution time drawn for closed tickets, in hours.
pub const RESOLUTION_HOURS_RANGE: (u32, u32) = (1, 72);

pub const DEFAULT_TICKET_COUNT: usize = 500;

/// Largest run whose ids still fit `Ticket::ticket_id`.
pub const MAX_TICKET_COUNT: usize = u32::MAX as usize;

/// Interval `date_opened` is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl YearWindow {
    /// January 1st of `now`'s year up to `now`.
    pub fn this_year(now: NaiveDateTime) -> Self {
        Self {
            start: start_of_year(now.year()).unwrap_or(now),
            end: now,
        }
    }

    /// The whole calendar year, Jan 1st 00:00:00 to Dec 31st 23:59:59.
    pub fn full_year(year: i32) -> Option<Self> {
        let start = start_of_year(year)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?.and_hms_opt(23, 59, 59)?;
        Some(Self { start, end })
    }

    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        dt >= self.start && dt <= self.end
    }
}

fn start_of_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Produces exactly `count` tickets numbered 1..=count.
/// Ids never wrap: `count` is capped at `MAX_TICKET_COUNT`.
pub fn generate_tickets(
    count: usize,
    window: YearWindow,
    provider: &mut impl ValueProvider,
) -> Vec<Ticket> {
    let (min_hours, max_hours) = RESOLUTION_HOURS_RANGE;
    let mut tickets = Vec::with_capacity(count.min(MAX_TICKET_COUNT));

    for ticket_id in (1..=u32::MAX).take(count) {
        let issue_type = provider.issue_type();
        let date_opened = provider.datetime_between(window.start, window.end);
        let lifecycle = match provider.status() {
            Status::Open => Lifecycle::Open,
            Status::InProgress => Lifecycle::InProgress,
            Status::Closed => Lifecycle::Closed {
                resolution_hours: provider.resolution_hours(min_hours, max_hours),
            },
        };

        tickets.push(Ticket {
            ticket_id,
            client: provider.company(),
            issue_type,
            date_opened,
            lifecycle,
        });
    }

    log::debug!(
        "generated {} tickets opened between {} and {}",
        tickets.len(),
        window.start,
        window.end
    );
    tickets
}
