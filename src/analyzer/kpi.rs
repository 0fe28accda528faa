use std::fmt;

use crate::analyzer::stats::{mean, percentage, round2};
use crate::model::{Status, Ticket};

/// Headline figures for a ticket set.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub in_progress: usize,
    /// Mean resolution time of closed tickets, 2 decimals. 0 when none are closed.
    pub avg_resolution_hours: f64,
    /// Share of closed tickets resolved within the threshold, 2 decimals.
    pub sla_compliance_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KpiValue {
    Count(usize),
    Decimal(f64),
}

impl KpiValue {
    pub fn as_f64(self) -> f64 {
        match self {
            KpiValue::Count(n) => n as f64,
            KpiValue::Decimal(v) => v,
        }
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Count(n) => write!(f, "{}", n),
            KpiValue::Decimal(v) => write!(f, "{:.2}", v),
        }
    }
}

/// One `Metric, Value` line of the KPI table.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRow {
    pub metric: &'static str,
    pub value: KpiValue,
}

pub fn compute_kpis(tickets: &[Ticket], sla_threshold_hours: u32) -> KpiSummary {
    let count = |status: Status| tickets.iter().filter(|t| t.status() == status).count();

    let resolution: Vec<f64> = tickets
        .iter()
        .filter_map(|t| t.resolution_time_hours())
        .map(f64::from)
        .collect();
    let compliant = tickets
        .iter()
        .filter(|t| t.within_sla(sla_threshold_hours))
        .count();

    KpiSummary {
        total: tickets.len(),
        open: count(Status::Open),
        closed: count(Status::Closed),
        in_progress: count(Status::InProgress),
        avg_resolution_hours: round2(mean(&resolution)),
        sla_compliance_pct: round2(percentage(compliant, resolution.len())),
    }
}

impl KpiSummary {
    /// Rows in export order.
    pub fn rows(&self) -> Vec<KpiRow> {
        vec![
            KpiRow {
                metric: "Total Tickets",
                value: KpiValue::Count(self.total),
            },
            KpiRow {
                metric: "Open Tickets",
                value: KpiValue::Count(self.open),
            },
            KpiRow {
                metric: "Closed Tickets",
                value: KpiValue::Count(self.closed),
            },
            KpiRow {
                metric: "In Progress Tickets",
                value: KpiValue::Count(self.in_progress),
            },
            KpiRow {
                metric: "Average Resolution Time (hrs)",
                value: KpiValue::Decimal(self.avg_resolution_hours),
            },
            KpiRow {
                metric: "SLA Compliance (%)",
                value: KpiValue::Decimal(self.sla_compliance_pct),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssueType, Lifecycle};
    use chrono::NaiveDate;

    fn make(id: u32, issue_type: IssueType, lifecycle: Lifecycle) -> Ticket {
        Ticket {
            ticket_id: id,
            client: format!("Client {}", id),
            issue_type,
            date_opened: NaiveDate::from_ymd_opt(2026, 2, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            lifecycle,
        }
    }

    fn closed(h: u32) -> Lifecycle {
        Lifecycle::Closed {
            resolution_hours: h,
        }
    }

    #[test]
    fn test_three_ticket_scenario() {
        let tickets = vec![
            make(1, IssueType::Network, closed(10)),
            make(2, IssueType::Login, Lifecycle::Open),
            make(3, IssueType::Software, closed(30)),
        ];
        let k = compute_kpis(&tickets, 24);
        assert_eq!(k.total, 3);
        assert_eq!(k.open, 1);
        assert_eq!(k.closed, 2);
        assert_eq!(k.in_progress, 0);
        assert_eq!(k.avg_resolution_hours, 20.0);
        assert_eq!(k.sla_compliance_pct, 50.0);
    }

    #[test]
    fn test_no_closed_tickets_falls_back_to_zero() {
        let tickets = vec![
            make(1, IssueType::Network, Lifecycle::Open),
            make(2, IssueType::Login, Lifecycle::InProgress),
        ];
        let k = compute_kpis(&tickets, 24);
        assert_eq!(k.closed, 0);
        assert_eq!(k.avg_resolution_hours, 0.0);
        assert_eq!(k.sla_compliance_pct, 0.0);
    }

    #[test]
    fn test_all_within_sla_is_hundred() {
        let tickets = vec![
            make(1, IssueType::Hardware, closed(1)),
            make(2, IssueType::Hardware, closed(24)),
            make(3, IssueType::Login, Lifecycle::Open),
        ];
        assert_eq!(compute_kpis(&tickets, 24).sla_compliance_pct, 100.0);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let tickets = vec![
            make(1, IssueType::Hardware, closed(5)),
            make(2, IssueType::Login, Lifecycle::Open),
            make(3, IssueType::Login, Lifecycle::InProgress),
            make(4, IssueType::Software, Lifecycle::InProgress),
        ];
        let k = compute_kpis(&tickets, 24);
        assert_eq!(k.open + k.closed + k.in_progress, k.total);
    }

    #[test]
    fn test_average_is_rounded() {
        let tickets = vec![
            make(1, IssueType::Network, closed(1)),
            make(2, IssueType::Network, closed(1)),
            make(3, IssueType::Network, closed(2)),
        ];
        // 4 / 3 = 1.333..
        assert_eq!(compute_kpis(&tickets, 24).avg_resolution_hours, 1.33);
    }

    #[test]
    fn test_empty_set() {
        let k = compute_kpis(&[], 24);
        assert_eq!(k.total, 0);
        assert_eq!(k.avg_resolution_hours, 0.0);
        assert_eq!(k.sla_compliance_pct, 0.0);
    }

    #[test]
    fn test_rows_fixed_order() {
        let rows = compute_kpis(&[], 24).rows();
        let metrics: Vec<&str> = rows.iter().map(|r| r.metric).collect();
        assert_eq!(
            metrics,
            vec![
                "Total Tickets",
                "Open Tickets",
                "Closed Tickets",
                "In Progress Tickets",
                "Average Resolution Time (hrs)",
                "SLA Compliance (%)",
            ]
        );
        assert_eq!(rows[0].value.to_string(), "0");
        assert_eq!(rows[5].value.to_string(), "0.00");
    }
}
