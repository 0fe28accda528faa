use std::fmt;

use chrono::{Duration, NaiveDateTime};

/// Timestamp layout used in every exported table.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueType {
    Network,
    Login,
    Hardware,
    Software,
}

impl IssueType {
    pub const ALL: [IssueType; 4] = [
        IssueType::Login,
        IssueType::Network,
        IssueType::Hardware,
        IssueType::Software,
    ];

    /// Fixed issue → priority lookup.
    pub fn priority(self) -> Priority {
        match self {
            IssueType::Network => Priority::High,
            IssueType::Login => Priority::Medium,
            IssueType::Hardware => Priority::High,
            IssueType::Software => Priority::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IssueType::Network => "Network",
            IssueType::Login => "Login",
            IssueType::Hardware => "Hardware",
            IssueType::Software => "Software",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Open,
    Closed,
    InProgress,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::Closed, Status::InProgress];

    pub fn label(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Closed => "Closed",
            Status::InProgress => "In Progress",
        }
    }
}

macro_rules! display_via_label {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(IssueType, Priority, Status);

/// Lifecycle of a ticket. Closing data only exists on the `Closed` variant,
/// so a closed date without a resolution time cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Open,
    InProgress,
    Closed { resolution_hours: u32 },
}

impl Lifecycle {
    pub fn status(&self) -> Status {
        match self {
            Lifecycle::Open => Status::Open,
            Lifecycle::InProgress => Status::InProgress,
            Lifecycle::Closed { .. } => Status::Closed,
        }
    }
}

/// One synthetic support ticket. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub ticket_id: u32,
    pub client: String,
    pub issue_type: IssueType,
    pub date_opened: NaiveDateTime,
    pub lifecycle: Lifecycle,
}

impl Ticket {
    pub fn priority(&self) -> Priority {
        self.issue_type.priority()
    }

    pub fn status(&self) -> Status {
        self.lifecycle.status()
    }

    pub fn resolution_time_hours(&self) -> Option<u32> {
        match self.lifecycle {
            Lifecycle::Closed { resolution_hours } => Some(resolution_hours),
            _ => None,
        }
    }

    pub fn date_closed(&self) -> Option<NaiveDateTime> {
        self.resolution_time_hours()
            .map(|h| self.date_opened + Duration::hours(h as i64))
    }

    /// True iff the ticket is resolved and took at most `threshold_hours`.
    pub fn within_sla(&self, threshold_hours: u32) -> bool {
        self.resolution_time_hours()
            .is_some_and(|h| h <= threshold_hours)
    }
}
