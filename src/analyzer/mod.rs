pub mod distribution;
pub mod kpi;
pub mod stats;
pub mod temporal;

pub use distribution::{Distribution, DistributionRow};
pub use kpi::{KpiRow, KpiSummary, KpiValue};
pub use temporal::DailyTrendRow;

use crate::model::Ticket;

/// Default SLA: a ticket must be resolved within 24 hours.
pub const DEFAULT_SLA_THRESHOLD_HOURS: u32 = 24;

/// SLA outcome of one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaFlag {
    pub ticket_id: u32,
    pub within_sla: bool,
}

/// Every derived view of one ticket snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTables {
    pub kpis: KpiSummary,
    pub daily_trend: Vec<DailyTrendRow>,
    pub issue_types: Distribution,
    pub priorities: Distribution,
    /// Parallel to the input slice.
    pub sla_flags: Vec<SlaFlag>,
}

/// Derives all report tables from the ticket set. The input is only read.
pub fn aggregate(tickets: &[Ticket], sla_threshold_hours: u32) -> ReportTables {
    let sla_flags = tickets
        .iter()
        .map(|t| SlaFlag {
            ticket_id: t.ticket_id,
            within_sla: t.within_sla(sla_threshold_hours),
        })
        .collect();

    let tables = ReportTables {
        kpis: kpi::compute_kpis(tickets, sla_threshold_hours),
        daily_trend: temporal::compute_daily_trend(tickets),
        issue_types: distribution::issue_type_distribution(tickets),
        priorities: distribution::priority_distribution(tickets),
        sla_flags,
    };

    log::debug!(
        "aggregated {} tickets into {} trend days",
        tickets.len(),
        tables.daily_trend.len()
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::ScriptedProvider;
    use crate::generator::{generate_tickets, FakerProvider, YearWindow};
    use crate::model::{IssueType, Status};
    use chrono::NaiveDate;

    fn window() -> YearWindow {
        YearWindow::this_year(
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_scripted_scenario_end_to_end() {
        let mut p = ScriptedProvider::new(&[
            (IssueType::Network, Status::Closed, Some(10)),
            (IssueType::Login, Status::Open, None),
            (IssueType::Software, Status::Closed, Some(30)),
        ]);
        let tickets = generate_tickets(3, window(), &mut p);
        let tables = aggregate(&tickets, DEFAULT_SLA_THRESHOLD_HOURS);

        let values: Vec<(&str, f64)> = tables
            .kpis
            .rows()
            .iter()
            .map(|r| (r.metric, r.value.as_f64()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Total Tickets", 3.0),
                ("Open Tickets", 1.0),
                ("Closed Tickets", 2.0),
                ("In Progress Tickets", 0.0),
                ("Average Resolution Time (hrs)", 20.0),
                ("SLA Compliance (%)", 50.0),
            ]
        );

        let flags: Vec<bool> = tables.sla_flags.iter().map(|f| f.within_sla).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_trend_counts_match_ticket_set() {
        let mut p = FakerProvider::seeded(99);
        let tickets = generate_tickets(500, window(), &mut p);
        let tables = aggregate(&tickets, DEFAULT_SLA_THRESHOLD_HOURS);

        let opened: usize = tables.daily_trend.iter().map(|r| r.tickets_opened).sum();
        let closed: usize = tables.daily_trend.iter().map(|r| r.tickets_closed).sum();
        assert_eq!(opened, 500);
        assert_eq!(closed, tables.kpis.closed);

        for row in &tables.daily_trend {
            let expected_open = tickets
                .iter()
                .filter(|t| t.date_opened.date() == row.date)
                .count();
            let expected_closed = tickets
                .iter()
                .filter(|t| t.date_closed().map(|c| c.date()) == Some(row.date))
                .count();
            assert_eq!(row.tickets_opened, expected_open);
            assert_eq!(row.tickets_closed, expected_closed);
        }
        assert!(tables
            .daily_trend
            .windows(2)
            .all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_kpi_bounds_on_random_set() {
        let mut p = FakerProvider::seeded(5);
        let tickets = generate_tickets(300, window(), &mut p);
        let k = aggregate(&tickets, DEFAULT_SLA_THRESHOLD_HOURS).kpis;
        assert_eq!(k.open + k.closed + k.in_progress, k.total);
        assert!((0.0..=100.0).contains(&k.sla_compliance_pct));
        assert!(k.closed == 0 || (1.0..=72.0).contains(&k.avg_resolution_hours));
    }

    #[test]
    fn test_empty_snapshot() {
        let tables = aggregate(&[], DEFAULT_SLA_THRESHOLD_HOURS);
        assert_eq!(tables.kpis.total, 0);
        assert!(tables.daily_trend.is_empty());
        assert!(tables.issue_types.rows.is_empty());
        assert!(tables.priorities.rows.is_empty());
        assert!(tables.sla_flags.is_empty());
    }
}
